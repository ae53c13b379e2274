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
use std::error::Error;
use std::fmt::Display;

/// Axis of an image, used to say which source dimension was rejected
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Axis {
    Width,
    Height,
}

impl Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Width => f.write_str("width"),
            Axis::Height => f.write_str("height"),
        }
    }
}

/// Buffer mismatch error description
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct PlaneBufferMismatch {
    pub expected: usize,
    pub stride: usize,
    pub height: usize,
    pub slice_len: usize,
}

/// Error enumeration type
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum RescaleError {
    /// Zero width or height was requested
    InvalidDimensions { width: u32, height: u32 },
    /// Destination pixel count is over the configured limit
    DimensionsExceedLimit { width: u32, height: u32, limit: u32 },
    /// Source plane is too large for the resampling backend
    SourceDimensionsTooLargeForBackend {
        axis: Axis,
        source: u32,
        destination: u32,
    },
    /// No resampling backend is present in this build or configuration
    BackendUnavailable,
    InvalidStride { min_stride: usize, stride: usize },
    BufferMismatch(PlaneBufferMismatch),
    UnsupportedBitDepth(u32),
    /// Plane sample type, ownership or chroma presence does not fit the image
    PlaneLayoutMismatch(&'static str),
    OutOfMemory(usize),
}

impl RescaleError {
    /// Returns error as int code
    #[inline]
    pub fn code(&self) -> usize {
        match self {
            RescaleError::InvalidDimensions { .. } => 1,
            RescaleError::DimensionsExceedLimit { .. } => 2,
            RescaleError::SourceDimensionsTooLargeForBackend { .. } => 3,
            RescaleError::BackendUnavailable => 4,
            RescaleError::InvalidStride { .. } => 5,
            RescaleError::BufferMismatch(_) => 6,
            RescaleError::UnsupportedBitDepth(_) => 7,
            RescaleError::PlaneLayoutMismatch(_) => 8,
            RescaleError::OutOfMemory(_) => 9,
        }
    }
}

impl Display for RescaleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RescaleError::InvalidDimensions { width, height } => f.write_fmt(format_args!(
                "Rescale requested invalid destination dimensions [{width}x{height}]"
            )),
            RescaleError::DimensionsExceedLimit {
                width,
                height,
                limit,
            } => f.write_fmt(format_args!(
                "Rescale requested destination dimensions [{width}x{height}] that exceed the configured limit of {limit} pixels"
            )),
            RescaleError::SourceDimensionsTooLargeForBackend {
                axis,
                source,
                destination,
            } => f.write_fmt(format_args!(
                "Rescale requested invalid {axis} scale for the resampler [{source} -> {destination}]"
            )),
            RescaleError::BackendUnavailable => {
                f.write_str("Rescale called, but is unimplemented without a resampling backend")
            }
            RescaleError::InvalidStride { min_stride, stride } => f.write_fmt(format_args!(
                "Stride must be at least {min_stride}, but received {stride}",
            )),
            RescaleError::BufferMismatch(mismatch) => f.write_fmt(format_args!(
                "Plane buffer len expected to be at least {} [stride({})*h({})] but received {}",
                mismatch.expected, mismatch.stride, mismatch.height, mismatch.slice_len,
            )),
            RescaleError::UnsupportedBitDepth(depth) => {
                f.write_fmt(format_args!("Bit-depth must be in [1, 16] but got {depth}"))
            }
            RescaleError::PlaneLayoutMismatch(reason) => {
                f.write_fmt(format_args!("Plane layout mismatch: {reason}"))
            }
            RescaleError::OutOfMemory(capacity) => f.write_fmt(format_args!(
                "There is no enough memory to allocate {capacity} samples"
            )),
        }
    }
}

impl Error for RescaleError {}

macro_rules! try_vec {
    ($elem:expr; $n:expr) => {{
        let mut v = Vec::new();
        v.try_reserve_exact($n)
            .map_err(|_| crate::rescale_error::RescaleError::OutOfMemory($n))?;
        v.resize($n, $elem);
        v
    }};
}

pub(crate) use try_vec;
