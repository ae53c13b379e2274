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
use crate::convolve_naive::SampleStorage;
use crate::dispatch_group::{convolve_horizontal_dispatch, convolve_vertical_dispatch};
use crate::image_size::ImageSize;
use crate::math::generate_weights;
use crate::nearest_sampler::{copy_plane, resize_nearest};
use crate::rescale_error::{PlaneBufferMismatch, RescaleError, try_vec};
use crate::sampler::ResamplingFunction;
use crate::threading_policy::ThreadingPolicy;

/// Resampling backend for a single plane.
///
/// Strides are counted in samples. Source and destination never alias.
pub trait PlaneResampler {
    /// Scales a plane of 8-bit samples
    fn scale_plane_u8(
        &self,
        src: &[u8],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u8],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: ResamplingFunction,
    ) -> Result<(), RescaleError>;

    /// Scales a plane of `bit_depth` samples stored in 16-bit words
    fn scale_plane_u16(
        &self,
        src: &[u16],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u16],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: ResamplingFunction,
        bit_depth: u32,
    ) -> Result<(), RescaleError>;
}

#[derive(Debug, Copy, Clone, Default)]
/// Built-in separable convolution scaler
pub struct Scaler {
    pub(crate) threading_policy: ThreadingPolicy,
}

impl Scaler {
    pub fn new() -> Self {
        Scaler::default()
    }

    pub fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy) {
        self.threading_policy = threading_policy;
    }

    pub fn threading_policy(&self) -> ThreadingPolicy {
        self.threading_policy
    }

    fn resize_plane_impl<T: SampleStorage>(
        &self,
        src: &[T],
        src_stride: usize,
        src_size: ImageSize,
        dst: &mut [T],
        dst_stride: usize,
        dst_size: ImageSize,
        filter: ResamplingFunction,
        max_value: f32,
    ) -> Result<(), RescaleError> {
        check_plane(src, src_stride, src_size)?;
        check_plane(dst, dst_stride, dst_size)?;

        if src_size == dst_size {
            copy_plane(
                src,
                src_stride,
                dst,
                dst_stride,
                dst_size.width,
                dst_size.height,
            );
            return Ok(());
        }

        if filter == ResamplingFunction::Nearest {
            resize_nearest(
                src,
                src_stride,
                src_size.width,
                src_size.height,
                dst,
                dst_stride,
                dst_size.width,
                dst_size.height,
            );
            return Ok(());
        }

        let vertical_filters = generate_weights(filter, src_size.height, dst_size.height)?;
        let horizontal_filters = generate_weights(filter, src_size.width, dst_size.width)?;

        let pool = self.threading_policy.get_pool(dst_size);

        let transient_stride = src_size.width;
        let mut transient: Vec<T> = try_vec![T::default(); transient_stride * dst_size.height];

        convolve_vertical_dispatch(
            src,
            src_stride,
            &vertical_filters,
            &mut transient,
            transient_stride,
            src_size.width,
            dst_size.height,
            max_value,
            &pool,
        );

        convolve_horizontal_dispatch(
            &transient,
            transient_stride,
            src_size.width,
            &horizontal_filters,
            dst,
            dst_stride,
            dst_size.width,
            dst_size.height,
            max_value,
            &pool,
        );

        Ok(())
    }
}

impl PlaneResampler for Scaler {
    fn scale_plane_u8(
        &self,
        src: &[u8],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u8],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: ResamplingFunction,
    ) -> Result<(), RescaleError> {
        self.resize_plane_impl(
            src,
            src_stride,
            ImageSize::new(src_width, src_height),
            dst,
            dst_stride,
            ImageSize::new(dst_width, dst_height),
            filter,
            u8::MAX as f32,
        )
    }

    fn scale_plane_u16(
        &self,
        src: &[u16],
        src_stride: usize,
        src_width: usize,
        src_height: usize,
        dst: &mut [u16],
        dst_stride: usize,
        dst_width: usize,
        dst_height: usize,
        filter: ResamplingFunction,
        bit_depth: u32,
    ) -> Result<(), RescaleError> {
        if !(1..=16).contains(&bit_depth) {
            return Err(RescaleError::UnsupportedBitDepth(bit_depth));
        }
        self.resize_plane_impl(
            src,
            src_stride,
            ImageSize::new(src_width, src_height),
            dst,
            dst_stride,
            ImageSize::new(dst_width, dst_height),
            filter,
            ((1u32 << bit_depth) - 1) as f32,
        )
    }
}

fn check_plane<T>(data: &[T], stride: usize, size: ImageSize) -> Result<(), RescaleError> {
    if size.width == 0 || size.height == 0 {
        return Err(RescaleError::InvalidDimensions {
            width: size.width as u32,
            height: size.height as u32,
        });
    }
    if stride < size.width {
        return Err(RescaleError::InvalidStride {
            min_stride: size.width,
            stride,
        });
    }
    let expected = stride
        .checked_mul(size.height)
        .ok_or(RescaleError::OutOfMemory(usize::MAX))?;
    if data.len() < expected {
        return Err(RescaleError::BufferMismatch(PlaneBufferMismatch {
            expected,
            stride,
            height: size.height,
            slice_len: data.len(),
        }));
    }
    Ok(())
}
