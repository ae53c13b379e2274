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
#![deny(deprecated)]
#![allow(clippy::too_many_arguments)]
mod allocator;
mod convolve_naive;
mod diagnostics;
mod dispatch_group;
mod filter_weights;
mod image;
mod image_size;
mod math;
mod nearest_sampler;
mod pixel_format;
mod rescale;
mod rescale_error;
mod sampler;
mod scaler;
mod threading_policy;

pub use allocator::{DefaultPlaneAllocator, PlaneAllocator};
pub use diagnostics::Diagnostics;
pub use image::{
    BufferStore, Channel, Ownership, Plane, PlaneBuffer, PlaneGroup, YuvPlanes, YuvaImage,
};
pub use image_size::ImageSize;
pub use math::*;
pub use pixel_format::{PixelFormat, PixelFormatInfo};
pub use rescale::{DEFAULT_FILTER, MAX_BACKEND_DIMENSION, Rescaler, rescale_image};
pub use rescale_error::{Axis, PlaneBufferMismatch, RescaleError};
pub use sampler::{ResamplingFunction, bilinear};
pub use scaler::{PlaneResampler, Scaler};
pub use threading_policy::ThreadingPolicy;
