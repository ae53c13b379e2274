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
use crate::image::{Channel, Plane, PlaneGroup, YuvPlanes, YuvaImage};
use crate::rescale_error::{RescaleError, try_vec};

/// Provides plane buffers for an image and takes back the ones it owned.
pub trait PlaneAllocator {
    /// Allocates `group` for the current dimensions, format and depth of `image`,
    /// replacing whatever the image held for that group.
    fn allocate_planes(
        &self,
        image: &mut YuvaImage<'_>,
        group: PlaneGroup,
    ) -> Result<(), RescaleError>;

    /// Receives a plane the image owned and no longer uses
    fn release_plane(&self, plane: Plane<'_>) {
        drop(plane);
    }
}

/// Zero initialized, tightly packed planes with optional row alignment
#[derive(Debug, Copy, Clone)]
pub struct DefaultPlaneAllocator {
    row_alignment: usize,
}

impl Default for DefaultPlaneAllocator {
    fn default() -> Self {
        DefaultPlaneAllocator { row_alignment: 1 }
    }
}

impl DefaultPlaneAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rounds row bytes up to `alignment`, itself rounded up to a power of two
    pub fn with_row_alignment(alignment: usize) -> Self {
        DefaultPlaneAllocator {
            row_alignment: alignment.max(1).next_power_of_two(),
        }
    }

    pub fn row_alignment(&self) -> usize {
        self.row_alignment
    }

    fn make_plane(
        &self,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<Plane<'static>, RescaleError> {
        let sample_size = if depth > 8 { 2 } else { 1 };
        let alignment = self.row_alignment.max(sample_size);
        let row_bytes = (width as usize)
            .checked_mul(sample_size)
            .and_then(|v| v.checked_next_multiple_of(alignment))
            .ok_or(RescaleError::OutOfMemory(usize::MAX))?;
        let samples = (row_bytes / sample_size)
            .checked_mul(height as usize)
            .ok_or(RescaleError::OutOfMemory(usize::MAX))?;
        if depth > 8 {
            Ok(Plane::owned_u16(try_vec![0u16; samples], row_bytes))
        } else {
            Ok(Plane::owned_u8(try_vec![0u8; samples], row_bytes))
        }
    }
}

impl PlaneAllocator for DefaultPlaneAllocator {
    fn allocate_planes(
        &self,
        image: &mut YuvaImage<'_>,
        group: PlaneGroup,
    ) -> Result<(), RescaleError> {
        let depth = image.depth();
        match group {
            PlaneGroup::Yuv => {
                let (width, height) = image.plane_dimensions(Channel::Y);
                let y = self.make_plane(width, height, depth)?;
                let planes = if image.yuv_format().has_chroma() {
                    let (chroma_width, chroma_height) = image.plane_dimensions(Channel::U);
                    YuvPlanes::new(
                        y,
                        self.make_plane(chroma_width, chroma_height, depth)?,
                        self.make_plane(chroma_width, chroma_height, depth)?,
                    )
                } else {
                    YuvPlanes::luma_only(y)
                };
                image.set_yuv_planes(planes)
            }
            PlaneGroup::Alpha => {
                let (width, height) = image.plane_dimensions(Channel::A);
                let alpha = self.make_plane(width, height, depth)?;
                image.set_alpha_plane(alpha)
            }
        }
    }
}
