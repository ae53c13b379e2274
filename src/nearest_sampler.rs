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
/// Picks, for each destination sample, the source sample under its center
pub(crate) fn resize_nearest<T: Copy>(
    src: &[T],
    src_stride: usize,
    src_width: usize,
    src_height: usize,
    dst: &mut [T],
    dst_stride: usize,
    dst_width: usize,
    dst_height: usize,
) {
    let x_scale = src_width as f64 / dst_width as f64;
    let y_scale = src_height as f64 / dst_height as f64;

    for (y, dst_row) in dst.chunks_exact_mut(dst_stride).take(dst_height).enumerate() {
        let src_y = (((y as f64 + 0.5f64) * y_scale) as usize).min(src_height - 1);
        let src_row = &src[src_y * src_stride..src_y * src_stride + src_width];
        for (x, dst) in dst_row[..dst_width].iter_mut().enumerate() {
            let src_x = (((x as f64 + 0.5f64) * x_scale) as usize).min(src_width - 1);
            *dst = src_row[src_x];
        }
    }
}

/// Row by row copy between planes of equal dimensions
pub(crate) fn copy_plane<T: Copy>(
    src: &[T],
    src_stride: usize,
    dst: &mut [T],
    dst_stride: usize,
    width: usize,
    height: usize,
) {
    for (src_row, dst_row) in src
        .chunks(src_stride)
        .zip(dst.chunks_exact_mut(dst_stride))
        .take(height)
    {
        dst_row[..width].copy_from_slice(&src_row[..width]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearest_doubles_samples() {
        let src = [1u8, 2, 3, 4];
        let mut dst = [0u8; 16];
        resize_nearest(&src, 2, 2, 2, &mut dst, 4, 4, 4);
        assert_eq!(dst, [1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]);
    }

    #[test]
    fn copy_respects_strides() {
        let src = [1u16, 2, 99, 3, 4, 99];
        let mut dst = [0u16; 8];
        copy_plane(&src, 3, &mut dst, 4, 2, 2);
        assert_eq!(dst, [1, 2, 0, 0, 3, 4, 0, 0]);
    }
}
