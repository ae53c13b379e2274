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
use num_traits::{AsPrimitive, Float};

/// Mitchell-Netravali family of cubic splines, `b` and `c` select the member
#[inline(always)]
pub fn bc_spline<V: Float + 'static>(d: V, b: V, c: V) -> V
where
    f64: AsPrimitive<V>,
{
    let x = d.abs();
    let dp = x * x;
    let tp = dp * x;
    let sixth: V = (1f64 / 6f64).as_();
    if x < 1f64.as_() {
        return ((12f64.as_() - 9f64.as_() * b - 6f64.as_() * c) * tp
            + ((-18f64).as_() + 12f64.as_() * b + 6f64.as_() * c) * dp
            + (6f64.as_() - 2f64.as_() * b))
            * sixth;
    } else if x < 2f64.as_() {
        return ((-b - 6f64.as_() * c) * tp
            + (6f64.as_() * b + 30f64.as_() * c) * dp
            + ((-12f64).as_() * b - 48f64.as_() * c) * x
            + (8f64.as_() * b + 24f64.as_() * c))
            * sixth;
    }
    V::zero()
}

#[inline(always)]
pub fn mitchell_netravalli<V: Float + 'static>(x: V) -> V
where
    f64: AsPrimitive<V>,
{
    let third: V = (1f64 / 3f64).as_();
    bc_spline(x, third, third)
}

#[inline(always)]
pub fn catmull_rom<V: Float + 'static>(x: V) -> V
where
    f64: AsPrimitive<V>,
{
    bc_spline(x, V::zero(), 0.5f64.as_())
}
