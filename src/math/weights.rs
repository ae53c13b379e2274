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
use crate::ResamplingFunction;
use crate::filter_weights::{FilterBounds, FilterWeights};
use crate::rescale_error::{RescaleError, try_vec};
use crate::sampler::FilterKernel;

/// Builds normalized weights mapping `in_size` source samples onto `out_size`
pub(crate) fn generate_weights(
    function: ResamplingFunction,
    in_size: usize,
    out_size: usize,
) -> Result<FilterWeights<f32>, RescaleError> {
    if in_size == 0 || out_size == 0 {
        return Err(RescaleError::InvalidDimensions {
            width: in_size as u32,
            height: out_size as u32,
        });
    }
    let filter = function.get_resampling_filter(in_size, out_size);
    let scale = in_size as f64 / out_size as f64;
    let filter_scale_cutoff = if filter.is_resizable_kernel {
        scale.max(1f64)
    } else {
        1f64
    };
    let support = filter.support * filter_scale_cutoff;
    let kernel_size = (support.ceil() as usize) * 2 + 1;

    let mut weights: Vec<f32> = try_vec![0f32; kernel_size * out_size];
    let mut local_filters: Vec<f64> = try_vec![0f64; kernel_size];
    let mut bounds: Vec<FilterBounds> = try_vec![FilterBounds::new(0, 0); out_size];

    let half_footprint = scale * 0.5f64;

    for (i, (bound, row)) in bounds
        .iter_mut()
        .zip(weights.chunks_exact_mut(kernel_size))
        .enumerate()
    {
        let center = (i as f64 + 0.5f64) * scale;

        let start = (center - support).floor().max(0f64) as usize;
        let end = ((center + support).ceil() as usize)
            .min(in_size)
            .min(start + kernel_size);

        let mut weights_sum = 0f64;
        for (k, local) in (start..end).zip(local_filters.iter_mut()) {
            let weight = match filter.kernel {
                FilterKernel::Coverage => {
                    let lo = (k as f64).max(center - half_footprint);
                    let hi = (k as f64 + 1f64).min(center + half_footprint);
                    (hi - lo).max(0f64)
                }
                FilterKernel::Function(kernel) => {
                    kernel((k as f64 + 0.5f64 - center) / filter_scale_cutoff)
                }
                FilterKernel::Point => {
                    if k == center as usize {
                        1f64
                    } else {
                        0f64
                    }
                }
            };
            *local = weight;
            weights_sum += weight;
        }

        if weights_sum == 0f64 {
            // Footprint fell between samples, take the nearest one.
            let nearest = (center.floor() as usize).min(in_size - 1);
            *bound = FilterBounds::new(nearest, 1);
            row[0] = 1f32;
            continue;
        }

        let size = end - start;
        *bound = FilterBounds::new(start, size);
        let recip = 1f64 / weights_sum;
        for (dst, &src) in row.iter_mut().zip(local_filters.iter()).take(size) {
            *dst = (src * recip) as f32;
        }
    }

    Ok(FilterWeights::new(weights, kernel_size, bounds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nearest_sampler::resize_nearest;

    fn sum_of(weights: &FilterWeights<f32>, i: usize) -> f32 {
        let (_, taps) = weights.taps(i);
        taps.iter().sum()
    }

    #[test]
    fn box_halving_averages_pairs() {
        let weights = generate_weights(ResamplingFunction::Box, 8, 4).unwrap();
        for i in 0..4 {
            let (bounds, taps) = weights.taps(i);
            assert_eq!(bounds, FilterBounds::new(i * 2, 2));
            assert!((taps[0] - 0.5).abs() < 1e-6);
            assert!((taps[1] - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn box_fractional_downscale_is_area_weighted() {
        // 3 -> 2: each destination sample covers 1.5 source samples.
        let weights = generate_weights(ResamplingFunction::Box, 3, 2).unwrap();
        let (bounds, taps) = weights.taps(0);
        assert_eq!(bounds.start, 0);
        assert!((taps[0] - 2f32 / 3f32).abs() < 1e-6);
        assert!((taps[1] - 1f32 / 3f32).abs() < 1e-6);
    }

    #[test]
    fn every_sample_is_normalized() {
        let functions = [
            ResamplingFunction::Bilinear,
            ResamplingFunction::Box,
            ResamplingFunction::CatmullRom,
            ResamplingFunction::MitchellNetravalli,
            ResamplingFunction::Lanczos3,
        ];
        for function in functions {
            for (in_size, out_size) in [(7usize, 3usize), (3, 7), (100, 1), (1, 5), (16, 16)] {
                let weights = generate_weights(function, in_size, out_size).unwrap();
                for i in 0..out_size {
                    let (bounds, _) = weights.taps(i);
                    assert!(bounds.start + bounds.size <= in_size);
                    assert!((sum_of(&weights, i) - 1f32).abs() < 1e-4);
                }
            }
        }
    }

    #[test]
    fn nearest_weights_pick_the_sampled_source() {
        let src: Vec<u8> = (0..7).collect();
        for out_size in [3usize, 7, 12] {
            let weights = generate_weights(ResamplingFunction::Nearest, 7, out_size).unwrap();
            let mut expected = vec![0u8; out_size];
            resize_nearest(&src, 7, 7, 1, &mut expected, out_size, out_size, 1);
            for (i, &sample) in expected.iter().enumerate() {
                let (bounds, taps) = weights.taps(i);
                let picked = (bounds.start..bounds.start + bounds.size)
                    .zip(taps)
                    .filter(|&(_, &weight)| weight != 0f32)
                    .collect::<Vec<_>>();
                assert_eq!(picked, vec![(sample as usize, &1f32)]);
            }
        }
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(generate_weights(ResamplingFunction::Box, 0, 3).is_err());
        assert!(generate_weights(ResamplingFunction::Box, 3, 0).is_err());
    }
}
