use burn::prelude::*;
use burn::tensor::{DType, Element, ElementConversion};

pub mod activation;
pub mod batch_norm;
pub mod loss;

/// Offset added to divisors so that a division never overflows the backend float type.
///
/// Sits between the smallest normal exponent and the machine epsilon of the type:
/// about 8.2e-8 for f32, 4.1e-16 for f64, 7.1e-4 for f16 and 2.1e-5 for bf16.
pub fn div_eps_f32<B: Backend>() -> f32 {
    use burn::tensor::{bf16, f16};
    let (min_exp, epsilon) = match <B::FloatElem as Element>::dtype() {
        DType::F64 => (f64::MIN_EXP, f64::EPSILON as f32),
        DType::F16 => (f16::MIN_EXP, f16::EPSILON.to_f32()),
        DType::BF16 => (bf16::MIN_EXP, bf16::EPSILON.to_f32()),
        _ => (f32::MIN_EXP, f32::EPSILON),
    };
    let raw_exp = -(-min_exp as f32 * 2.3).powf(0.35);
    10f32.powf((raw_exp + epsilon.log10()) / 2.)
}

pub fn div_eps<B: Backend>() -> B::FloatElem {
    div_eps_f32::<B>().elem()
}
