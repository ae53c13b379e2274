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
use crate::convolve_naive::{SampleStorage, convolve_horizontal_row, convolve_vertical_row};
use crate::filter_weights::FilterWeights;
use rayon::ThreadPool;
use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::prelude::ParallelSliceMut;

/// Source rows of `src_width` samples scaled to `dst_height` rows
pub(crate) fn convolve_vertical_dispatch<T: SampleStorage>(
    src: &[T],
    src_stride: usize,
    filter_weights: &FilterWeights<f32>,
    dst: &mut [T],
    dst_stride: usize,
    dst_width: usize,
    dst_height: usize,
    max_value: f32,
    pool: &Option<ThreadPool>,
) {
    let process_row = |y: usize, row: &mut [T]| {
        let (bounds, weights) = filter_weights.taps(y);
        convolve_vertical_row(
            dst_width,
            &bounds,
            weights,
            src,
            src_stride,
            &mut row[..dst_width],
            max_value,
        );
    };

    let dst = &mut dst[..dst_stride * dst_height];
    if let Some(pool) = pool {
        pool.install(|| {
            dst.par_chunks_exact_mut(dst_stride)
                .enumerate()
                .for_each(|(y, row)| process_row(y, row));
        });
    } else {
        dst.chunks_exact_mut(dst_stride)
            .enumerate()
            .for_each(|(y, row)| process_row(y, row));
    }
}

/// Rows of `src_width` samples scaled to `dst_width`, row count unchanged
pub(crate) fn convolve_horizontal_dispatch<T: SampleStorage>(
    src: &[T],
    src_stride: usize,
    src_width: usize,
    filter_weights: &FilterWeights<f32>,
    dst: &mut [T],
    dst_stride: usize,
    dst_width: usize,
    dst_height: usize,
    max_value: f32,
    pool: &Option<ThreadPool>,
) {
    let process_row = |y: usize, row: &mut [T]| {
        let src_row = &src[y * src_stride..y * src_stride + src_width];
        convolve_horizontal_row(src_row, &mut row[..dst_width], filter_weights, max_value);
    };

    let dst = &mut dst[..dst_stride * dst_height];
    if let Some(pool) = pool {
        pool.install(|| {
            dst.par_chunks_exact_mut(dst_stride)
                .enumerate()
                .for_each(|(y, row)| process_row(y, row));
        });
    } else {
        dst.chunks_exact_mut(dst_stride)
            .enumerate()
            .for_each(|(y, row)| process_row(y, row));
    }
}
