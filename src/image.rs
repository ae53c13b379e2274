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
use crate::pixel_format::PixelFormat;
use crate::rescale_error::{PlaneBufferMismatch, RescaleError};
use std::fmt::Debug;

/// Sample storage that is either owned by the image or borrowed from the caller
#[derive(Debug)]
pub enum BufferStore<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStore<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn ownership(&self) -> Ownership {
        match self {
            Self::Borrowed(_) => Ownership::Borrowed,
            Self::Owned(_) => Ownership::Owned,
        }
    }
}

/// Who is responsible for releasing a plane group
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Ownership {
    /// The image releases the buffers
    Owned,
    /// The caller keeps the buffers, the image only references them
    Borrowed,
}

/// Plane samples, `u8` for bit depth up to 8 and `u16` words above it
#[derive(Debug)]
pub enum PlaneBuffer<'a> {
    U8(BufferStore<'a, u8>),
    U16(BufferStore<'a, u16>),
}

impl PlaneBuffer<'_> {
    /// Size of one sample in bytes
    #[inline]
    pub fn sample_size(&self) -> usize {
        match self {
            PlaneBuffer::U8(_) => 1,
            PlaneBuffer::U16(_) => 2,
        }
    }

    #[inline]
    pub fn len_bytes(&self) -> usize {
        match self {
            PlaneBuffer::U8(store) => store.borrow().len(),
            PlaneBuffer::U16(store) => store.borrow().len() * 2,
        }
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        match self {
            PlaneBuffer::U8(store) => store.ownership(),
            PlaneBuffer::U16(store) => store.ownership(),
        }
    }
}

/// Single grid of samples with its row stride in bytes
#[derive(Debug)]
pub struct Plane<'a> {
    pub(crate) buffer: PlaneBuffer<'a>,
    pub(crate) row_bytes: usize,
}

impl<'a> Plane<'a> {
    pub fn owned_u8(data: Vec<u8>, row_bytes: usize) -> Self {
        Plane {
            buffer: PlaneBuffer::U8(BufferStore::Owned(data)),
            row_bytes,
        }
    }

    pub fn owned_u16(data: Vec<u16>, row_bytes: usize) -> Self {
        Plane {
            buffer: PlaneBuffer::U16(BufferStore::Owned(data)),
            row_bytes,
        }
    }

    pub fn borrowed_u8(data: &'a mut [u8], row_bytes: usize) -> Self {
        Plane {
            buffer: PlaneBuffer::U8(BufferStore::Borrowed(data)),
            row_bytes,
        }
    }

    pub fn borrowed_u16(data: &'a mut [u16], row_bytes: usize) -> Self {
        Plane {
            buffer: PlaneBuffer::U16(BufferStore::Borrowed(data)),
            row_bytes,
        }
    }

    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.row_bytes
    }

    /// Row stride in samples
    #[inline]
    pub fn stride(&self) -> usize {
        self.row_bytes / self.buffer.sample_size()
    }

    #[inline]
    pub fn ownership(&self) -> Ownership {
        self.buffer.ownership()
    }

    pub fn buffer(&self) -> &PlaneBuffer<'a> {
        &self.buffer
    }

    pub fn as_u8(&self) -> Option<&[u8]> {
        match &self.buffer {
            PlaneBuffer::U8(store) => Some(store.borrow()),
            PlaneBuffer::U16(_) => None,
        }
    }

    pub fn as_u8_mut(&mut self) -> Option<&mut [u8]> {
        match &mut self.buffer {
            PlaneBuffer::U8(store) => Some(store.borrow_mut()),
            PlaneBuffer::U16(_) => None,
        }
    }

    pub fn as_u16(&self) -> Option<&[u16]> {
        match &self.buffer {
            PlaneBuffer::U16(store) => Some(store.borrow()),
            PlaneBuffer::U8(_) => None,
        }
    }

    pub fn as_u16_mut(&mut self) -> Option<&mut [u16]> {
        match &mut self.buffer {
            PlaneBuffer::U16(store) => Some(store.borrow_mut()),
            PlaneBuffer::U8(_) => None,
        }
    }

    /// Checks that the plane can hold `width` x `height` samples of `depth` bits
    pub(crate) fn check_layout(
        &self,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<(), RescaleError> {
        let wide = depth > 8;
        match (&self.buffer, wide) {
            (PlaneBuffer::U8(_), false) | (PlaneBuffer::U16(_), true) => {}
            _ => {
                return Err(RescaleError::PlaneLayoutMismatch(
                    "sample width does not match the image bit depth",
                ));
            }
        }
        let sample_size = self.buffer.sample_size();
        if self.row_bytes % sample_size != 0 {
            return Err(RescaleError::PlaneLayoutMismatch(
                "row bytes must be a multiple of the sample size",
            ));
        }
        let min_stride = (width as usize)
            .checked_mul(sample_size)
            .ok_or(RescaleError::OutOfMemory(usize::MAX))?;
        if self.row_bytes < min_stride {
            return Err(RescaleError::InvalidStride {
                min_stride,
                stride: self.row_bytes,
            });
        }
        let expected = self
            .row_bytes
            .checked_mul(height as usize)
            .ok_or(RescaleError::OutOfMemory(usize::MAX))?;
        let slice_len = self.buffer.len_bytes();
        if slice_len < expected {
            return Err(RescaleError::BufferMismatch(PlaneBufferMismatch {
                expected,
                stride: self.row_bytes,
                height: height as usize,
                slice_len,
            }));
        }
        Ok(())
    }
}

/// Luma plane plus the `[U, V]` chroma pair, which is absent for [PixelFormat::Yuv400]
#[derive(Debug)]
pub struct YuvPlanes<'a> {
    pub y: Plane<'a>,
    pub chroma: Option<[Plane<'a>; 2]>,
}

impl<'a> YuvPlanes<'a> {
    pub fn new(y: Plane<'a>, u: Plane<'a>, v: Plane<'a>) -> Self {
        YuvPlanes {
            y,
            chroma: Some([u, v]),
        }
    }

    pub fn luma_only(y: Plane<'a>) -> Self {
        YuvPlanes { y, chroma: None }
    }

    pub fn u(&self) -> Option<&Plane<'a>> {
        self.chroma.as_ref().map(|c| &c[0])
    }

    pub fn v(&self) -> Option<&Plane<'a>> {
        self.chroma.as_ref().map(|c| &c[1])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Plane<'a>> {
        std::iter::once(&self.y).chain(self.chroma.iter().flatten())
    }

    /// Ownership shared by every plane of the group
    pub fn ownership(&self) -> Ownership {
        self.y.ownership()
    }
}

/// Planes that are allocated and released together
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum PlaneGroup {
    Yuv,
    Alpha,
}

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum Channel {
    Y,
    U,
    V,
    A,
}

/// Planar YUV image with an optional independent alpha plane
#[derive(Debug)]
pub struct YuvaImage<'a> {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) depth: u32,
    pub(crate) yuv_format: PixelFormat,
    pub(crate) yuv: Option<YuvPlanes<'a>>,
    pub(crate) alpha: Option<Plane<'a>>,
}

impl<'a> YuvaImage<'a> {
    /// Creates an image without planes
    pub fn new(
        width: u32,
        height: u32,
        depth: u32,
        yuv_format: PixelFormat,
    ) -> Result<Self, RescaleError> {
        if width == 0 || height == 0 {
            return Err(RescaleError::InvalidDimensions { width, height });
        }
        if !(1..=16).contains(&depth) {
            return Err(RescaleError::UnsupportedBitDepth(depth));
        }
        Ok(YuvaImage {
            width,
            height,
            depth,
            yuv_format,
            yuv: None,
            alpha: None,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    #[inline]
    pub fn yuv_format(&self) -> PixelFormat {
        self.yuv_format
    }

    /// Samples are stored as `u16` words
    #[inline]
    pub fn uses_wide_samples(&self) -> bool {
        self.depth > 8
    }

    #[inline]
    pub fn has_planes(&self) -> bool {
        self.yuv.is_some() || self.alpha.is_some()
    }

    /// Dimensions of the plane behind `channel` for the current image size
    pub fn plane_dimensions(&self, channel: Channel) -> (u32, u32) {
        match channel {
            Channel::Y | Channel::A => (self.width, self.height),
            Channel::U | Channel::V => {
                let info = self.yuv_format.info();
                (info.chroma_width(self.width), info.chroma_height(self.height))
            }
        }
    }

    /// Attaches the YUV group, replacing a previous one.
    ///
    /// Every plane must match the image bit depth, hold its subsampled dimensions,
    /// and share one [Ownership]. Chroma must be present unless the format is
    /// [PixelFormat::Yuv400].
    pub fn set_yuv_planes(&mut self, planes: YuvPlanes<'a>) -> Result<(), RescaleError> {
        planes.y.check_layout(self.width, self.height, self.depth)?;
        match (&planes.chroma, self.yuv_format.has_chroma()) {
            (Some(chroma), true) => {
                let (chroma_width, chroma_height) = self.plane_dimensions(Channel::U);
                for plane in chroma.iter() {
                    plane.check_layout(chroma_width, chroma_height, self.depth)?;
                }
            }
            (None, false) => {}
            (Some(_), false) => {
                return Err(RescaleError::PlaneLayoutMismatch(
                    "monochrome image can't carry chroma planes",
                ));
            }
            (None, true) => {
                return Err(RescaleError::PlaneLayoutMismatch(
                    "chroma planes are required for this pixel format",
                ));
            }
        }
        let ownership = planes.y.ownership();
        if planes.iter().any(|p| p.ownership() != ownership) {
            return Err(RescaleError::PlaneLayoutMismatch(
                "YUV planes must share one ownership",
            ));
        }
        self.yuv = Some(planes);
        Ok(())
    }

    pub fn set_alpha_plane(&mut self, plane: Plane<'a>) -> Result<(), RescaleError> {
        plane.check_layout(self.width, self.height, self.depth)?;
        self.alpha = Some(plane);
        Ok(())
    }

    pub fn take_yuv_planes(&mut self) -> Option<YuvPlanes<'a>> {
        self.yuv.take()
    }

    pub fn take_alpha_plane(&mut self) -> Option<Plane<'a>> {
        self.alpha.take()
    }

    pub fn yuv_planes(&self) -> Option<&YuvPlanes<'a>> {
        self.yuv.as_ref()
    }

    pub fn alpha_plane(&self) -> Option<&Plane<'a>> {
        self.alpha.as_ref()
    }

    pub fn yuv_ownership(&self) -> Option<Ownership> {
        self.yuv.as_ref().map(|p| p.ownership())
    }

    pub fn alpha_ownership(&self) -> Option<Ownership> {
        self.alpha.as_ref().map(|p| p.ownership())
    }

    pub fn plane(&self, channel: Channel) -> Option<&Plane<'a>> {
        match channel {
            Channel::Y => self.yuv.as_ref().map(|p| &p.y),
            Channel::U => self.yuv.as_ref().and_then(|p| p.u()),
            Channel::V => self.yuv.as_ref().and_then(|p| p.v()),
            Channel::A => self.alpha.as_ref(),
        }
    }

    /// Mutable access to samples; layout can't be changed through it
    pub fn plane_samples_u8_mut(&mut self, channel: Channel) -> Option<&mut [u8]> {
        self.plane_mut(channel).and_then(|p| p.as_u8_mut())
    }

    pub fn plane_samples_u16_mut(&mut self, channel: Channel) -> Option<&mut [u16]> {
        self.plane_mut(channel).and_then(|p| p.as_u16_mut())
    }

    fn plane_mut(&mut self, channel: Channel) -> Option<&mut Plane<'a>> {
        match channel {
            Channel::Y => self.yuv.as_mut().map(|p| &mut p.y),
            Channel::U => self
                .yuv
                .as_mut()
                .and_then(|p| p.chroma.as_mut())
                .map(|c| &mut c[0]),
            Channel::V => self
                .yuv
                .as_mut()
                .and_then(|p| p.chroma.as_mut())
                .map(|c| &mut c[1]),
            Channel::A => self.alpha.as_mut(),
        }
    }
}
