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
use crate::math::sinc::Sinc;
use num_traits::{AsPrimitive, Float};

#[inline(always)]
pub fn lanczos_sinc<V: Float + Sinc + 'static>(x: V, a: V) -> V {
    if x.abs() < a {
        return x.sinc() * (x / a).sinc();
    }
    V::zero()
}

#[inline(always)]
pub fn lanczos3<V: Float + Sinc + 'static>(x: V) -> V
where
    f64: AsPrimitive<V>,
{
    lanczos_sinc(x, 3f64.as_())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanczos3_vanishes_on_integers() {
        assert!((lanczos3(0f64) - 1f64).abs() < 1e-9);
        for i in 1..4 {
            assert!(lanczos3(i as f64).abs() < 1e-9);
        }
        assert_eq!(lanczos3(3.5f64), 0f64);
    }
}
