/*
 * Copyright (c) Radzivon Bartoshyk. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use yuva_scale::{PlaneResampler, ResamplingFunction, Scaler, ThreadingPolicy};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u16,
    pub src_height: u16,
    pub src_padding: u8,
    pub dst_width: u16,
    pub dst_height: u16,
    pub value: u16,
    pub bit_depth: u8,
    pub threading: bool,
}

fuzz_target!(|data: SrcImage| {
    resize_plane(
        data.src_width as usize,
        data.src_height as usize,
        data.src_padding as usize,
        data.dst_width as usize,
        data.dst_height as usize,
        data.value,
        data.bit_depth as u32,
        if data.threading {
            ThreadingPolicy::Adaptive
        } else {
            ThreadingPolicy::Single
        },
    )
});

fn resize_plane(
    src_width: usize,
    src_height: usize,
    src_padding: usize,
    dst_width: usize,
    dst_height: usize,
    value: u16,
    bit_depth: u32,
    threading_policy: ThreadingPolicy,
) {
    if src_width == 0
        || src_width > 512
        || src_height == 0
        || src_height > 512
        || dst_width == 0
        || dst_width > 512
        || dst_height == 0
        || dst_height > 512
        || !(1..=16).contains(&bit_depth)
    {
        return;
    }

    let max_value = ((1u32 << bit_depth) - 1) as u16;
    let value = value.min(max_value);
    let src_stride = src_width + src_padding;
    let src_data = vec![value; src_stride * src_height];
    let mut dst_data = vec![0u16; dst_width * dst_height];

    let mut scaler = Scaler::new();
    scaler.set_threading_policy(threading_policy);
    scaler
        .scale_plane_u16(
            &src_data,
            src_stride,
            src_width,
            src_height,
            &mut dst_data,
            dst_width,
            dst_width,
            dst_height,
            ResamplingFunction::Lanczos3,
            bit_depth,
        )
        .unwrap();
    assert!(dst_data.iter().all(|&v| v == value));
}
