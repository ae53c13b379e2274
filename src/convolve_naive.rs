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
use crate::filter_weights::{FilterBounds, FilterWeights};
use num_traits::AsPrimitive;

/// Sample type that goes through an `f32` accumulator
pub(crate) trait SampleStorage: Copy + Default + Send + Sync + AsPrimitive<f32> {
    /// Rounds and clamps an accumulated value into `[0, max_value]`
    fn from_accumulator(value: f32, max_value: f32) -> Self;
}

impl SampleStorage for u8 {
    #[inline(always)]
    fn from_accumulator(value: f32, max_value: f32) -> Self {
        value.round().max(0f32).min(max_value) as u8
    }
}

impl SampleStorage for u16 {
    #[inline(always)]
    fn from_accumulator(value: f32, max_value: f32) -> Self {
        value.round().max(0f32).min(max_value) as u16
    }
}

#[inline(always)]
fn convolve_column<T: SampleStorage, const BUFFER_SIZE: usize>(
    start_x: usize,
    bounds: &FilterBounds,
    weights: &[f32],
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    max_value: f32,
) {
    let mut store = [0f32; BUFFER_SIZE];

    for (j, &weight) in weights.iter().enumerate() {
        let offset = (bounds.start + j) * src_stride + start_x;
        let src_row = &src[offset..offset + BUFFER_SIZE];
        for (acc, &px) in store.iter_mut().zip(src_row) {
            *acc += px.as_() * weight;
        }
    }

    for (dst, &acc) in dst[start_x..start_x + BUFFER_SIZE].iter_mut().zip(store.iter()) {
        *dst = T::from_accumulator(acc, max_value);
    }
}

/// Computes one destination row from the source rows listed in `bounds`
pub(crate) fn convolve_vertical_row<T: SampleStorage>(
    dst_width: usize,
    bounds: &FilterBounds,
    weights: &[f32],
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    max_value: f32,
) {
    let mut cx = 0usize;

    while cx + 16 <= dst_width {
        convolve_column::<T, 16>(cx, bounds, weights, src, src_stride, dst, max_value);
        cx += 16;
    }

    while cx + 4 <= dst_width {
        convolve_column::<T, 4>(cx, bounds, weights, src, src_stride, dst, max_value);
        cx += 4;
    }

    while cx < dst_width {
        convolve_column::<T, 1>(cx, bounds, weights, src, src_stride, dst, max_value);
        cx += 1;
    }
}

/// Computes one destination row from a source row of the same height
pub(crate) fn convolve_horizontal_row<T: SampleStorage>(
    src: &[T],
    dst: &mut [T],
    filter_weights: &FilterWeights<f32>,
    max_value: f32,
) {
    for (x, dst) in dst.iter_mut().enumerate() {
        let (bounds, weights) = filter_weights.taps(x);
        let src = &src[bounds.start..bounds.start + bounds.size];
        let sum = src
            .iter()
            .zip(weights)
            .fold(0f32, |acc, (&px, &weight)| acc + px.as_() * weight);
        *dst = T::from_accumulator(sum, max_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_row_mixes_rows() {
        // 2 rows of 5 samples, stride 6
        let src: Vec<u8> = vec![10, 20, 30, 40, 50, 0, 30, 40, 50, 60, 71, 0];
        let mut dst = vec![0u8; 5];
        convolve_vertical_row(
            5,
            &FilterBounds::new(0, 2),
            &[0.5f32, 0.5f32],
            &src,
            6,
            &mut dst,
            255f32,
        );
        assert_eq!(dst, vec![20, 30, 40, 50, 61]);
    }

    #[test]
    fn accumulator_is_clamped_to_depth() {
        assert_eq!(u16::from_accumulator(1100.4f32, 1023f32), 1023);
        assert_eq!(u16::from_accumulator(-3f32, 1023f32), 0);
        assert_eq!(u8::from_accumulator(127.5f32, 255f32), 128);
    }
}
