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
use crate::allocator::{DefaultPlaneAllocator, PlaneAllocator};
use crate::diagnostics::Diagnostics;
use crate::image::{Ownership, Plane, PlaneBuffer, PlaneGroup, YuvPlanes, YuvaImage};
use crate::rescale_error::{Axis, RescaleError};
use crate::sampler::ResamplingFunction;
use crate::scaler::{PlaneResampler, Scaler};
use crate::threading_policy::ThreadingPolicy;

/// Largest source width or height handed to the resampler.
/// Larger planes risk overflowing the fixed-size row arithmetic of scaling backends.
pub const MAX_BACKEND_DIMENSION: u32 = 16384;

/// Filter used unless another one is set on the [Rescaler]
pub const DEFAULT_FILTER: ResamplingFunction = ResamplingFunction::Box;

/// Resizes every plane of a [YuvaImage] in place.
///
/// Destination planes are allocated and filled aside and swapped into the image
/// only once every plane is scaled. Any error leaves the image exactly as it
/// was received.
#[derive(Debug, Clone)]
pub struct Rescaler<R = Scaler, A = DefaultPlaneAllocator> {
    resampler: Option<R>,
    allocator: A,
    filter: ResamplingFunction,
}

impl Default for Rescaler {
    fn default() -> Self {
        #[cfg(feature = "resample")]
        let resampler = Some(Scaler::new());
        #[cfg(not(feature = "resample"))]
        let resampler = None;
        Rescaler {
            resampler,
            allocator: DefaultPlaneAllocator::default(),
            filter: DEFAULT_FILTER,
        }
    }
}

impl Rescaler {
    /// Built-in backend when the `resample` feature is enabled, none otherwise
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescaler whose every request fails with [RescaleError::BackendUnavailable]
    pub fn without_backend() -> Self {
        Rescaler {
            resampler: None,
            allocator: DefaultPlaneAllocator::default(),
            filter: DEFAULT_FILTER,
        }
    }
}

impl<A> Rescaler<Scaler, A> {
    pub fn set_threading_policy(&mut self, threading_policy: ThreadingPolicy) {
        if let Some(scaler) = self.resampler.as_mut() {
            scaler.set_threading_policy(threading_policy);
        }
    }
}

impl<R, A> Rescaler<R, A> {
    pub fn with_resampler<N>(self, resampler: N) -> Rescaler<N, A> {
        Rescaler {
            resampler: Some(resampler),
            allocator: self.allocator,
            filter: self.filter,
        }
    }

    pub fn with_allocator<N>(self, allocator: N) -> Rescaler<R, N> {
        Rescaler {
            resampler: self.resampler,
            allocator,
            filter: self.filter,
        }
    }

    pub fn set_filter(&mut self, filter: ResamplingFunction) {
        self.filter = filter;
    }

    pub fn filter(&self) -> ResamplingFunction {
        self.filter
    }

    pub fn resampler(&self) -> Option<&R> {
        self.resampler.as_ref()
    }

    pub fn allocator(&self) -> &A {
        &self.allocator
    }
}

impl<R: PlaneResampler, A: PlaneAllocator> Rescaler<R, A> {
    /// Resizes `image` to `dst_width` x `dst_height`.
    ///
    /// Requests whose pixel count is above `pixel_count_limit` are refused, as are
    /// images with planes wider or taller than [MAX_BACKEND_DIMENSION]. A request
    /// for the current dimensions succeeds without touching the image.
    pub fn rescale(
        &self,
        image: &mut YuvaImage<'_>,
        dst_width: u32,
        dst_height: u32,
        pixel_count_limit: u32,
    ) -> Result<(), RescaleError> {
        let resampler = self
            .resampler
            .as_ref()
            .ok_or(RescaleError::BackendUnavailable)?;

        if image.width == dst_width && image.height == dst_height {
            return Ok(());
        }
        if dst_width == 0 || dst_height == 0 {
            return Err(RescaleError::InvalidDimensions {
                width: dst_width,
                height: dst_height,
            });
        }
        if dst_width > pixel_count_limit / dst_height {
            return Err(RescaleError::DimensionsExceedLimit {
                width: dst_width,
                height: dst_height,
                limit: pixel_count_limit,
            });
        }

        let src_width = image.width;
        let src_height = image.height;
        if image.has_planes() {
            if src_width > MAX_BACKEND_DIMENSION {
                return Err(RescaleError::SourceDimensionsTooLargeForBackend {
                    axis: Axis::Width,
                    source: src_width,
                    destination: dst_width,
                });
            }
            if src_height > MAX_BACKEND_DIMENSION {
                return Err(RescaleError::SourceDimensionsTooLargeForBackend {
                    axis: Axis::Height,
                    source: src_height,
                    destination: dst_height,
                });
            }
        }

        let mut staged = YuvaImage::new(dst_width, dst_height, image.depth, image.yuv_format)?;

        if let Some(src_planes) = image.yuv.as_ref() {
            self.allocator
                .allocate_planes(&mut staged, PlaneGroup::Yuv)?;
            let dst_planes = staged.yuv.as_mut().ok_or(RescaleError::PlaneLayoutMismatch(
                "allocator did not provide YUV planes",
            ))?;
            self.scale_yuv(
                resampler,
                image,
                src_planes,
                dst_planes,
                (dst_width, dst_height),
            )?;
        }

        if let Some(src_alpha) = image.alpha.as_ref() {
            self.allocator
                .allocate_planes(&mut staged, PlaneGroup::Alpha)?;
            let dst_alpha = staged.alpha.as_mut().ok_or(RescaleError::PlaneLayoutMismatch(
                "allocator did not provide an alpha plane",
            ))?;
            self.scale_plane(
                resampler,
                image,
                src_alpha,
                (src_width, src_height),
                dst_alpha,
                (dst_width, dst_height),
            )?;
        }

        let old_yuv = std::mem::replace(&mut image.yuv, staged.yuv.take());
        let old_alpha = std::mem::replace(&mut image.alpha, staged.alpha.take());
        image.width = dst_width;
        image.height = dst_height;

        if let Some(planes) = old_yuv {
            let YuvPlanes { y, chroma } = planes;
            self.release(y);
            for plane in chroma.into_iter().flatten() {
                self.release(plane);
            }
        }
        if let Some(plane) = old_alpha {
            self.release(plane);
        }

        Ok(())
    }

    fn scale_yuv(
        &self,
        resampler: &R,
        image: &YuvaImage<'_>,
        src_planes: &YuvPlanes<'_>,
        dst_planes: &mut YuvPlanes<'_>,
        dst_size: (u32, u32),
    ) -> Result<(), RescaleError> {
        let (src_width, src_height) = (image.width, image.height);
        let (dst_width, dst_height) = dst_size;

        self.scale_plane(
            resampler,
            image,
            &src_planes.y,
            (src_width, src_height),
            &mut dst_planes.y,
            dst_size,
        )?;

        match (&src_planes.chroma, &mut dst_planes.chroma) {
            (Some(src_chroma), Some(dst_chroma)) => {
                let info = image.yuv_format.info();
                let src_chroma_size = (info.chroma_width(src_width), info.chroma_height(src_height));
                let dst_chroma_size = (info.chroma_width(dst_width), info.chroma_height(dst_height));
                for (src, dst) in src_chroma.iter().zip(dst_chroma.iter_mut()) {
                    self.scale_plane(
                        resampler,
                        image,
                        src,
                        src_chroma_size,
                        dst,
                        dst_chroma_size,
                    )?;
                }
                Ok(())
            }
            (None, None) => Ok(()),
            _ => Err(RescaleError::PlaneLayoutMismatch(
                "source and destination disagree on chroma planes",
            )),
        }
    }

    fn scale_plane(
        &self,
        resampler: &R,
        image: &YuvaImage<'_>,
        src: &Plane<'_>,
        src_size: (u32, u32),
        dst: &mut Plane<'_>,
        dst_size: (u32, u32),
    ) -> Result<(), RescaleError> {
        let (src_width, src_height) = (src_size.0 as usize, src_size.1 as usize);
        let (dst_width, dst_height) = (dst_size.0 as usize, dst_size.1 as usize);
        let src_stride = src.stride();
        let dst_stride = dst.stride();
        let wide = image.uses_wide_samples();
        match (&src.buffer, &mut dst.buffer) {
            (PlaneBuffer::U8(src), PlaneBuffer::U8(dst)) if !wide => resampler
                .scale_plane_u8(
                    src.borrow(),
                    src_stride,
                    src_width,
                    src_height,
                    dst.borrow_mut(),
                    dst_stride,
                    dst_width,
                    dst_height,
                    self.filter,
                ),
            (PlaneBuffer::U16(src), PlaneBuffer::U16(dst)) if wide => resampler
                .scale_plane_u16(
                    src.borrow(),
                    src_stride,
                    src_width,
                    src_height,
                    dst.borrow_mut(),
                    dst_stride,
                    dst_width,
                    dst_height,
                    self.filter,
                    image.depth,
                ),
            _ => Err(RescaleError::PlaneLayoutMismatch(
                "sample width does not match the image bit depth",
            )),
        }
    }

    /// Owned planes go back to the allocator, borrowed ones stay with the caller.
    fn release(&self, plane: Plane<'_>) {
        if plane.ownership() == Ownership::Owned {
            self.allocator.release_plane(plane);
        }
    }
}

/// Rescales with the default [Rescaler], reporting failures to `diagnostics`.
///
/// Returns `false` on any failure.
pub fn rescale_image(
    image: &mut YuvaImage<'_>,
    dst_width: u32,
    dst_height: u32,
    pixel_count_limit: u32,
    diagnostics: &mut Diagnostics,
) -> bool {
    match Rescaler::default().rescale(image, dst_width, dst_height, pixel_count_limit) {
        Ok(()) => true,
        Err(err) => {
            diagnostics.report(err);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Channel;
    use crate::pixel_format::PixelFormat;
    use std::cell::{Cell, RefCell};

    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    enum SamplePath {
        Byte,
        Word(u32),
    }

    #[derive(Debug, Copy, Clone, Eq, PartialEq)]
    struct Call {
        path: SamplePath,
        src_stride: usize,
        src_size: (usize, usize),
        dst_stride: usize,
        dst_size: (usize, usize),
    }

    #[derive(Default)]
    struct RecordingResampler {
        calls: RefCell<Vec<Call>>,
        fail_on_call: Option<usize>,
    }

    impl RecordingResampler {
        fn record(&self, call: Call) -> Result<(), RescaleError> {
            let mut calls = self.calls.borrow_mut();
            calls.push(call);
            if self.fail_on_call == Some(calls.len()) {
                return Err(RescaleError::OutOfMemory(0));
            }
            Ok(())
        }
    }

    impl PlaneResampler for RecordingResampler {
        fn scale_plane_u8(
            &self,
            _: &[u8],
            src_stride: usize,
            src_width: usize,
            src_height: usize,
            _: &mut [u8],
            dst_stride: usize,
            dst_width: usize,
            dst_height: usize,
            _: ResamplingFunction,
        ) -> Result<(), RescaleError> {
            self.record(Call {
                path: SamplePath::Byte,
                src_stride,
                src_size: (src_width, src_height),
                dst_stride,
                dst_size: (dst_width, dst_height),
            })
        }

        fn scale_plane_u16(
            &self,
            _: &[u16],
            src_stride: usize,
            src_width: usize,
            src_height: usize,
            _: &mut [u16],
            dst_stride: usize,
            dst_width: usize,
            dst_height: usize,
            _: ResamplingFunction,
            bit_depth: u32,
        ) -> Result<(), RescaleError> {
            self.record(Call {
                path: SamplePath::Word(bit_depth),
                src_stride,
                src_size: (src_width, src_height),
                dst_stride,
                dst_size: (dst_width, dst_height),
            })
        }
    }

    #[derive(Default)]
    struct CountingAllocator {
        inner: DefaultPlaneAllocator,
        allocated: Cell<usize>,
        released: Cell<usize>,
    }

    impl PlaneAllocator for CountingAllocator {
        fn allocate_planes(
            &self,
            image: &mut YuvaImage<'_>,
            group: PlaneGroup,
        ) -> Result<(), RescaleError> {
            self.allocated.set(self.allocated.get() + 1);
            self.inner.allocate_planes(image, group)
        }

        fn release_plane(&self, plane: Plane<'_>) {
            assert_eq!(plane.ownership(), Ownership::Owned);
            self.released.set(self.released.get() + 1);
        }
    }

    fn recording() -> Rescaler<RecordingResampler, DefaultPlaneAllocator> {
        Rescaler::without_backend().with_resampler(RecordingResampler::default())
    }

    fn builtin() -> Rescaler {
        Rescaler::without_backend().with_resampler(Scaler::new())
    }

    fn counting() -> Rescaler<Scaler, CountingAllocator> {
        Rescaler::without_backend()
            .with_resampler(Scaler::new())
            .with_allocator(CountingAllocator::default())
    }

    /// Owned image with every present plane filled with a per channel value
    fn filled_image(
        width: u32,
        height: u32,
        depth: u32,
        format: PixelFormat,
        with_yuv: bool,
        with_alpha: bool,
    ) -> YuvaImage<'static> {
        let mut image = YuvaImage::new(width, height, depth, format).unwrap();
        let allocator = DefaultPlaneAllocator::with_row_alignment(16);
        if with_yuv {
            allocator
                .allocate_planes(&mut image, PlaneGroup::Yuv)
                .unwrap();
        }
        if with_alpha {
            allocator
                .allocate_planes(&mut image, PlaneGroup::Alpha)
                .unwrap();
        }
        for (channel, value) in [
            (Channel::Y, 50u16),
            (Channel::U, 100),
            (Channel::V, 150),
            (Channel::A, 200),
        ] {
            if depth > 8 {
                if let Some(samples) = image.plane_samples_u16_mut(channel) {
                    samples.fill(value * 16);
                }
            } else if let Some(samples) = image.plane_samples_u8_mut(channel) {
                samples.fill(value as u8);
            }
        }
        image
    }

    type PlaneSnapshot = (usize, Ownership, usize, Vec<u16>);

    fn snapshot(image: &YuvaImage<'_>) -> (u32, u32, Vec<Option<PlaneSnapshot>>) {
        let planes = [Channel::Y, Channel::U, Channel::V, Channel::A]
            .iter()
            .map(|&channel| {
                image.plane(channel).map(|plane| {
                    let (address, samples) = match plane.buffer() {
                        PlaneBuffer::U8(store) => (
                            store.borrow().as_ptr() as usize,
                            store
                                .borrow()
                                .iter()
                                .map(|&v| v as u16)
                                .collect::<Vec<u16>>(),
                        ),
                        PlaneBuffer::U16(store) => {
                            (store.borrow().as_ptr() as usize, store.borrow().to_vec())
                        }
                    };
                    (plane.row_bytes(), plane.ownership(), address, samples)
                })
            })
            .collect();
        (image.width(), image.height(), planes)
    }

    #[test]
    fn same_dimensions_are_a_no_op() {
        let mut image = filled_image(9, 7, 8, PixelFormat::Yuv420, true, true);
        let before = snapshot(&image);
        let rescaler = recording();
        rescaler.rescale(&mut image, 9, 7, 0).unwrap();
        assert_eq!(snapshot(&image), before);
        assert!(rescaler.resampler().unwrap().calls.borrow().is_empty());
    }

    #[test]
    fn zero_dimensions_are_rejected_without_mutation() {
        let mut image = filled_image(9, 7, 8, PixelFormat::Yuv420, true, true);
        let before = snapshot(&image);
        let rescaler = builtin();
        assert_eq!(
            rescaler.rescale(&mut image, 0, 7, u32::MAX).unwrap_err(),
            RescaleError::InvalidDimensions {
                width: 0,
                height: 7
            }
        );
        assert_eq!(
            rescaler.rescale(&mut image, 4, 0, u32::MAX).unwrap_err(),
            RescaleError::InvalidDimensions {
                width: 4,
                height: 0
            }
        );
        assert_eq!(snapshot(&image), before);
    }

    #[test]
    fn pixel_count_limit_is_inclusive() {
        let mut image = filled_image(50, 50, 8, PixelFormat::Yuv444, true, false);
        let before = snapshot(&image);
        let rescaler = builtin();
        assert_eq!(
            rescaler.rescale(&mut image, 100, 100, 9999).unwrap_err(),
            RescaleError::DimensionsExceedLimit {
                width: 100,
                height: 100,
                limit: 9999
            }
        );
        assert_eq!(snapshot(&image), before);
        rescaler.rescale(&mut image, 100, 100, 10000).unwrap();
        assert_eq!((image.width(), image.height()), (100, 100));
    }

    #[test]
    fn chroma_planes_use_rounded_up_dimensions() {
        let mut image = filled_image(7, 5, 8, PixelFormat::Yuv420, true, false);
        let rescaler = recording();
        rescaler.rescale(&mut image, 3, 3, u32::MAX).unwrap();
        let calls = rescaler.resampler().unwrap().calls.borrow();
        let sizes = calls
            .iter()
            .map(|c| (c.src_size, c.dst_size))
            .collect::<Vec<_>>();
        assert_eq!(
            sizes,
            vec![((7, 5), (3, 3)), ((4, 3), (2, 2)), ((4, 3), (2, 2))]
        );
        assert_eq!(image.plane_dimensions(Channel::U), (2, 2));
    }

    #[test]
    fn owned_planes_are_released_after_scaling() {
        let mut image = filled_image(16, 8, 8, PixelFormat::Yuv420, true, true);
        let rescaler = counting();
        rescaler.rescale(&mut image, 8, 4, u32::MAX).unwrap();
        assert_eq!(rescaler.allocator().allocated.get(), 2);
        assert_eq!(rescaler.allocator().released.get(), 4);
        assert_eq!(image.yuv_ownership(), Some(Ownership::Owned));
        assert_eq!(image.alpha_ownership(), Some(Ownership::Owned));
    }

    #[test]
    fn borrowed_planes_survive_and_are_not_released() {
        let mut y = vec![10u8; 8 * 4];
        let mut u = vec![20u8; 4 * 2];
        let mut v = vec![30u8; 4 * 2];
        let rescaler = counting();
        {
            let mut image = YuvaImage::new(8, 4, 8, PixelFormat::Yuv420).unwrap();
            image
                .set_yuv_planes(YuvPlanes::new(
                    Plane::borrowed_u8(&mut y, 8),
                    Plane::borrowed_u8(&mut u, 4),
                    Plane::borrowed_u8(&mut v, 4),
                ))
                .unwrap();
            assert_eq!(image.yuv_ownership(), Some(Ownership::Borrowed));
            rescaler.rescale(&mut image, 4, 2, u32::MAX).unwrap();
            assert_eq!(image.yuv_ownership(), Some(Ownership::Owned));
            assert!(
                image
                    .plane(Channel::Y)
                    .unwrap()
                    .as_u8()
                    .unwrap()
                    .iter()
                    .all(|&s| s == 10)
            );
        }
        assert_eq!(rescaler.allocator().released.get(), 0);
        assert_eq!(y, vec![10u8; 8 * 4]);
        assert_eq!(u, vec![20u8; 4 * 2]);
        assert_eq!(v, vec![30u8; 4 * 2]);
    }

    #[test]
    fn borrowed_planes_stay_attached_on_failure() {
        let mut alpha = vec![1u8; 6 * 6];
        let rescaler = counting();
        let mut image = YuvaImage::new(6, 6, 8, PixelFormat::Yuv444).unwrap();
        image
            .set_alpha_plane(Plane::borrowed_u8(&mut alpha, 6))
            .unwrap();
        assert!(rescaler.rescale(&mut image, 3, 3, 8).is_err());
        assert_eq!(image.alpha_ownership(), Some(Ownership::Borrowed));
        assert_eq!(rescaler.allocator().released.get(), 0);
    }

    #[test]
    fn alpha_only_image_scales_alpha_alone() {
        let mut image = filled_image(10, 6, 8, PixelFormat::Yuv420, false, true);
        let rescaler = recording();
        rescaler.rescale(&mut image, 5, 3, u32::MAX).unwrap();
        let calls = rescaler.resampler().unwrap().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].src_size, (10, 6));
        assert_eq!(calls[0].dst_size, (5, 3));
        assert!(image.yuv_planes().is_none());
        assert!(image.alpha_plane().is_some());
    }

    #[test]
    fn yuv_only_image_skips_alpha() {
        let mut image = filled_image(10, 6, 8, PixelFormat::Yuv422, true, false);
        let rescaler = recording();
        rescaler.rescale(&mut image, 5, 3, u32::MAX).unwrap();
        let calls = rescaler.resampler().unwrap().calls.borrow();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].src_size, (5, 6));
        assert_eq!(calls[1].dst_size, (3, 3));
        assert!(image.alpha_plane().is_none());
    }

    #[test]
    fn monochrome_scales_luma_only() {
        let mut image = filled_image(10, 6, 8, PixelFormat::Yuv400, true, false);
        let rescaler = recording();
        rescaler.rescale(&mut image, 20, 12, u32::MAX).unwrap();
        assert_eq!(rescaler.resampler().unwrap().calls.borrow().len(), 1);
        assert!(image.plane(Channel::U).is_none());
    }

    #[test]
    fn byte_path_uses_row_bytes_as_stride() {
        let mut image = filled_image(6, 4, 8, PixelFormat::Yuv444, false, true);
        let rescaler = recording();
        rescaler.rescale(&mut image, 3, 2, u32::MAX).unwrap();
        let calls = rescaler.resampler().unwrap().calls.borrow();
        assert_eq!(calls[0].path, SamplePath::Byte);
        // Source rows are aligned to 16 bytes, destination rows are packed.
        assert_eq!(calls[0].src_stride, 16);
        assert_eq!(calls[0].dst_stride, 3);
    }

    #[test]
    fn word_path_halves_row_bytes() {
        for depth in [10u32, 12, 16] {
            let mut image = filled_image(6, 4, depth, PixelFormat::Yuv444, false, true);
            assert_eq!(image.alpha_plane().unwrap().row_bytes(), 16);
            let rescaler = recording();
            rescaler.rescale(&mut image, 3, 2, u32::MAX).unwrap();
            let calls = rescaler.resampler().unwrap().calls.borrow();
            assert_eq!(calls[0].path, SamplePath::Word(depth));
            assert_eq!(calls[0].src_stride, 8);
            assert_eq!(calls[0].dst_stride, 3);
        }
    }

    #[test]
    fn ninth_bit_switches_to_words() {
        for (depth, path) in [(8u32, SamplePath::Byte), (9, SamplePath::Word(9))] {
            let mut image = filled_image(5, 5, depth, PixelFormat::Yuv420, true, false);
            assert_eq!(image.uses_wide_samples(), depth > 8);
            let rescaler = recording();
            rescaler.rescale(&mut image, 2, 2, u32::MAX).unwrap();
            let calls = rescaler.resampler().unwrap().calls.borrow();
            assert_eq!(calls.len(), 3);
            assert!(calls.iter().all(|call| call.path == path));
        }
    }

    #[test]
    fn missing_backend_leaves_image_untouched() {
        let mut image = filled_image(9, 7, 10, PixelFormat::Yuv420, true, true);
        let before = snapshot(&image);
        let rescaler = Rescaler::without_backend();
        for (width, height) in [(9, 7), (4, 4), (0, 0)] {
            assert_eq!(
                rescaler.rescale(&mut image, width, height, u32::MAX),
                Err(RescaleError::BackendUnavailable)
            );
        }
        assert_eq!(snapshot(&image), before);
    }

    #[cfg(not(feature = "resample"))]
    #[test]
    fn default_rescaler_has_no_backend() {
        let mut image = filled_image(9, 7, 8, PixelFormat::Yuv420, true, false);
        assert_eq!(
            Rescaler::default().rescale(&mut image, 4, 4, u32::MAX),
            Err(RescaleError::BackendUnavailable)
        );
    }

    #[test]
    fn oversized_source_is_rejected_before_mutation() {
        let mut image = filled_image(
            MAX_BACKEND_DIMENSION + 1,
            1,
            8,
            PixelFormat::Yuv444,
            false,
            true,
        );
        let before = snapshot(&image);
        assert_eq!(
            builtin().rescale(&mut image, 100, 1, u32::MAX),
            Err(RescaleError::SourceDimensionsTooLargeForBackend {
                axis: Axis::Width,
                source: MAX_BACKEND_DIMENSION + 1,
                destination: 100,
            })
        );
        assert_eq!(snapshot(&image), before);

        let mut image = filled_image(
            1,
            MAX_BACKEND_DIMENSION + 1,
            8,
            PixelFormat::Yuv444,
            false,
            true,
        );
        assert_eq!(
            builtin().rescale(&mut image, 1, 100, u32::MAX),
            Err(RescaleError::SourceDimensionsTooLargeForBackend {
                axis: Axis::Height,
                source: MAX_BACKEND_DIMENSION + 1,
                destination: 100,
            })
        );
        assert_eq!(image.height(), MAX_BACKEND_DIMENSION + 1);
    }

    #[test]
    fn image_without_planes_only_changes_dimensions() {
        let mut image =
            YuvaImage::new(MAX_BACKEND_DIMENSION * 2, 3, 8, PixelFormat::Yuv420).unwrap();
        builtin().rescale(&mut image, 10, 10, u32::MAX).unwrap();
        assert_eq!((image.width(), image.height()), (10, 10));
        assert!(!image.has_planes());
    }

    #[test]
    fn resampler_failure_keeps_source_planes() {
        let mut image = filled_image(12, 8, 8, PixelFormat::Yuv420, true, true);
        let before = snapshot(&image);
        let rescaler = Rescaler::without_backend().with_resampler(RecordingResampler {
            calls: RefCell::new(Vec::new()),
            fail_on_call: Some(4),
        });
        assert_eq!(
            rescaler.rescale(&mut image, 6, 4, u32::MAX),
            Err(RescaleError::OutOfMemory(0))
        );
        assert_eq!(snapshot(&image), before);
    }

    #[test]
    fn flat_planes_stay_flat() {
        let mut image = filled_image(17, 11, 8, PixelFormat::Yuv420, true, true);
        let mut rescaler = builtin();
        rescaler.set_filter(ResamplingFunction::Lanczos3);
        rescaler.rescale(&mut image, 13, 9, u32::MAX).unwrap();
        assert_eq!(image.plane_dimensions(Channel::V), (7, 5));
        for (channel, value) in [
            (Channel::Y, 50u8),
            (Channel::U, 100),
            (Channel::V, 150),
            (Channel::A, 200),
        ] {
            let plane = image.plane(channel).unwrap();
            let (width, height) = image.plane_dimensions(channel);
            assert_eq!(plane.as_u8().unwrap().len(), (width * height) as usize);
            assert!(plane.as_u8().unwrap().iter().all(|&s| s == value));
        }
    }

    #[test]
    fn wide_planes_keep_their_values() {
        let mut image = filled_image(21, 13, 12, PixelFormat::Yuv420, true, true);
        let mut rescaler = builtin();
        rescaler.set_threading_policy(ThreadingPolicy::Fixed(2));
        rescaler.rescale(&mut image, 40, 30, u32::MAX).unwrap();
        let luma = image.plane(Channel::Y).unwrap().as_u16().unwrap();
        assert_eq!(luma.len(), 40 * 30);
        assert!(luma.iter().all(|&s| s == 50 * 16));
        let alpha = image.plane(Channel::A).unwrap().as_u16().unwrap();
        assert!(alpha.iter().all(|&s| s == 200 * 16));
    }

    #[cfg(feature = "resample")]
    #[test]
    fn boolean_entry_point_reports_diagnostics() {
        let mut image = filled_image(8, 8, 8, PixelFormat::Yuv420, true, false);
        let mut diagnostics = Diagnostics::new();
        assert!(!rescale_image(&mut image, 0, 4, u32::MAX, &mut diagnostics));
        assert_eq!(
            diagnostics.error(),
            Some("Rescale requested invalid destination dimensions [0x4]")
        );
        diagnostics.clear();
        assert!(rescale_image(&mut image, 4, 4, u32::MAX, &mut diagnostics));
        assert_eq!(diagnostics.error(), None);
        assert_eq!((image.width(), image.height()), (4, 4));
    }
}
