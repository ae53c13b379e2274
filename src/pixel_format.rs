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
/// Chroma subsampling layout of the YUV planes
#[derive(Debug, Copy, Clone, Default, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum PixelFormat {
    Yuv444,
    Yuv422,
    #[default]
    Yuv420,
    /// Luma only, chroma planes are never present
    Yuv400,
}

/// Subsampling metadata for a [PixelFormat]
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct PixelFormatInfo {
    pub chroma_shift_x: u32,
    pub chroma_shift_y: u32,
    pub monochrome: bool,
}

impl PixelFormatInfo {
    /// Chroma plane width for a luma width, rounded up
    #[inline]
    pub fn chroma_width(&self, luma_width: u32) -> u32 {
        subsampled(luma_width, self.chroma_shift_x)
    }

    /// Chroma plane height for a luma height, rounded up
    #[inline]
    pub fn chroma_height(&self, luma_height: u32) -> u32 {
        subsampled(luma_height, self.chroma_shift_y)
    }
}

#[inline]
fn subsampled(dim: u32, shift: u32) -> u32 {
    // Widened so dimensions close to u32::MAX do not wrap.
    ((dim as u64 + shift as u64) >> shift) as u32
}

impl PixelFormat {
    pub fn info(&self) -> PixelFormatInfo {
        match self {
            PixelFormat::Yuv444 => PixelFormatInfo {
                chroma_shift_x: 0,
                chroma_shift_y: 0,
                monochrome: false,
            },
            PixelFormat::Yuv422 => PixelFormatInfo {
                chroma_shift_x: 1,
                chroma_shift_y: 0,
                monochrome: false,
            },
            PixelFormat::Yuv420 => PixelFormatInfo {
                chroma_shift_x: 1,
                chroma_shift_y: 1,
                monochrome: false,
            },
            PixelFormat::Yuv400 => PixelFormatInfo {
                chroma_shift_x: 1,
                chroma_shift_y: 1,
                monochrome: true,
            },
        }
    }

    #[inline]
    pub fn has_chroma(&self) -> bool {
        !self.info().monochrome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chroma_dimensions_round_up() {
        let info = PixelFormat::Yuv420.info();
        assert_eq!(info.chroma_width(7), 4);
        assert_eq!(info.chroma_height(5), 3);
        assert_eq!(info.chroma_width(8), 4);
        assert_eq!(info.chroma_height(1), 1);
    }

    #[test]
    fn horizontal_only_subsampling() {
        let info = PixelFormat::Yuv422.info();
        assert_eq!(info.chroma_width(7), 4);
        assert_eq!(info.chroma_height(5), 5);
    }

    #[test]
    fn full_resolution_chroma() {
        let info = PixelFormat::Yuv444.info();
        assert_eq!(info.chroma_width(7), 7);
        assert_eq!(info.chroma_height(5), 5);
    }

    #[test]
    fn no_wrap_at_u32_max() {
        let info = PixelFormat::Yuv420.info();
        assert_eq!(info.chroma_width(u32::MAX), 1u32 << 31);
    }

    #[test]
    fn monochrome_has_no_chroma() {
        assert!(!PixelFormat::Yuv400.has_chroma());
        assert!(PixelFormat::Yuv420.has_chroma());
    }
}
