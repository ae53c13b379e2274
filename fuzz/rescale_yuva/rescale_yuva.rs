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
use yuva_scale::{
    DefaultPlaneAllocator, PixelFormat, PlaneAllocator, PlaneGroup, ResamplingFunction, Rescaler,
    ThreadingPolicy, YuvaImage,
};

#[derive(Clone, Debug, Arbitrary)]
pub struct SrcImage {
    pub src_width: u16,
    pub src_height: u16,
    pub dst_width: u16,
    pub dst_height: u16,
    pub depth: u8,
    pub format: u8,
    pub filter: u8,
    pub with_yuv: bool,
    pub with_alpha: bool,
    pub threading: bool,
    pub value: u16,
}

fuzz_target!(|data: SrcImage| {
    let format = match data.format % 4 {
        0 => PixelFormat::Yuv444,
        1 => PixelFormat::Yuv422,
        2 => PixelFormat::Yuv420,
        _ => PixelFormat::Yuv400,
    };
    let filter = match data.filter % 6 {
        0 => ResamplingFunction::Nearest,
        1 => ResamplingFunction::Bilinear,
        2 => ResamplingFunction::Box,
        3 => ResamplingFunction::CatmullRom,
        4 => ResamplingFunction::MitchellNetravalli,
        _ => ResamplingFunction::Lanczos3,
    };
    rescale(
        data.src_width as u32,
        data.src_height as u32,
        data.dst_width as u32,
        data.dst_height as u32,
        data.depth as u32,
        format,
        filter,
        data.with_yuv,
        data.with_alpha,
        if data.threading {
            ThreadingPolicy::Adaptive
        } else {
            ThreadingPolicy::Single
        },
        data.value,
    )
});

fn rescale(
    src_width: u32,
    src_height: u32,
    dst_width: u32,
    dst_height: u32,
    depth: u32,
    format: PixelFormat,
    filter: ResamplingFunction,
    with_yuv: bool,
    with_alpha: bool,
    threading_policy: ThreadingPolicy,
    value: u16,
) {
    if src_width > 512 || src_height > 512 || dst_width > 512 || dst_height > 512 {
        return;
    }

    let Ok(mut image) = YuvaImage::new(src_width, src_height, depth, format) else {
        return;
    };
    let allocator = DefaultPlaneAllocator::with_row_alignment(value as usize % 64);
    if with_yuv {
        allocator
            .allocate_planes(&mut image, PlaneGroup::Yuv)
            .unwrap();
    }
    if with_alpha {
        allocator
            .allocate_planes(&mut image, PlaneGroup::Alpha)
            .unwrap();
    }

    let mut rescaler = Rescaler::new();
    rescaler.set_filter(filter);
    rescaler.set_threading_policy(threading_policy);
    match rescaler.rescale(&mut image, dst_width, dst_height, u32::MAX) {
        Ok(()) => {
            assert_eq!(image.width(), dst_width);
            assert_eq!(image.height(), dst_height);
        }
        Err(_) => {
            assert!(dst_width == 0 || dst_height == 0);
            assert_eq!(image.width(), src_width);
            assert_eq!(image.height(), src_height);
        }
    }
}
