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
use crate::math::{catmull_rom, lanczos3, mitchell_netravalli};

/// Filter used to compute destination samples
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ResamplingFunction {
    Nearest,
    Bilinear,
    /// Area average when downscaling, bilinear when upscaling.
    /// Highest quality of the set for downscaling, and the slowest one.
    #[default]
    Box,
    CatmullRom,
    MitchellNetravalli,
    Lanczos3,
}

#[inline(always)]
pub fn bilinear(x: f64) -> f64 {
    let x = x.abs();
    if x < 1f64 { 1f64 - x } else { 0f64 }
}

/// How weights for one axis are produced
#[derive(Copy, Clone)]
pub(crate) enum FilterKernel {
    /// Weight is the overlap of a source sample with the destination footprint
    Coverage,
    /// Single tap on the source sample under the destination center
    Point,
    Function(fn(f64) -> f64),
}

#[derive(Copy, Clone)]
pub(crate) struct ResamplingFilter {
    pub kernel: FilterKernel,
    /// Kernel radius in source samples at scale 1
    pub support: f64,
    /// Kernel widens with the downscale factor
    pub is_resizable_kernel: bool,
}

impl ResamplingFilter {
    fn new(kernel: fn(f64) -> f64, support: f64) -> ResamplingFilter {
        ResamplingFilter {
            kernel: FilterKernel::Function(kernel),
            support,
            is_resizable_kernel: true,
        }
    }
}

impl ResamplingFunction {
    /// Returns the filter for one axis going from `in_size` to `out_size` samples
    pub(crate) fn get_resampling_filter(&self, in_size: usize, out_size: usize) -> ResamplingFilter {
        match self {
            ResamplingFunction::Box => {
                if out_size > in_size {
                    ResamplingFilter::new(bilinear, 1f64)
                } else {
                    ResamplingFilter {
                        kernel: FilterKernel::Coverage,
                        support: 0.5f64,
                        is_resizable_kernel: true,
                    }
                }
            }
            ResamplingFunction::Nearest => ResamplingFilter {
                kernel: FilterKernel::Point,
                support: 0.5f64,
                is_resizable_kernel: false,
            },
            ResamplingFunction::Bilinear => ResamplingFilter::new(bilinear, 1f64),
            ResamplingFunction::CatmullRom => ResamplingFilter::new(catmull_rom::<f64>, 2f64),
            ResamplingFunction::MitchellNetravalli => {
                ResamplingFilter::new(mitchell_netravalli::<f64>, 2f64)
            }
            ResamplingFunction::Lanczos3 => ResamplingFilter::new(lanczos3::<f64>, 3f64),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_upscale_uses_bilinear_weights() {
        let filter = ResamplingFunction::Box.get_resampling_filter(4, 8);
        assert!(matches!(filter.kernel, FilterKernel::Function(_)));
        assert_eq!(filter.support, 1f64);
        let filter = ResamplingFunction::Box.get_resampling_filter(8, 4);
        assert!(matches!(filter.kernel, FilterKernel::Coverage));
    }

    #[test]
    fn nearest_is_a_point_filter() {
        let filter = ResamplingFunction::Nearest.get_resampling_filter(8, 3);
        assert!(matches!(filter.kernel, FilterKernel::Point));
        assert!(!filter.is_resizable_kernel);
    }

    #[test]
    fn kernels_are_normalized_at_center() {
        assert_eq!(bilinear(0f64), 1f64);
        assert_eq!(bilinear(1f64), 0f64);
    }
}
