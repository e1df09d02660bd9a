//! 有理数类型, 用于帧率与宽高比.

use std::fmt;

/// 有理数, 由分子和分母组成
///
/// 例如 MPEG frame_rate_code 5 对应 30000/1001 (29.97fps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rational {
    /// 分子
    pub num: i32,
    /// 分母
    pub den: i32,
}

/// frame_rate_code 1..=8 对应的帧率
const FRAME_RATES: [(i32, i32); 9] = [
    (0, 0),
    (24000, 1001),
    (24, 1),
    (25, 1),
    (30000, 1001),
    (30, 1),
    (50, 1),
    (60000, 1001),
    (60, 1),
];

impl Rational {
    /// 创建新的有理数
    pub const fn new(num: i32, den: i32) -> Self {
        Self { num, den }
    }

    /// 未定义 (分母为 0)
    pub const UNDEFINED: Self = Self { num: 0, den: 0 };

    /// 判断是否有效 (分母不为 0)
    pub const fn is_valid(&self) -> bool {
        self.den != 0
    }

    /// 由序列头 frame_rate_code 及序列扩展中的 n/d 扩展位求帧率
    ///
    /// 未定义或保留的码值返回 [`Rational::UNDEFINED`].
    pub fn from_frame_rate_code(code: u8, ext_n: u8, ext_d: u8) -> Self {
        match FRAME_RATES.get(code as usize) {
            Some(&(num, den)) if den != 0 => Self {
                num: num * (i32::from(ext_n) + 1),
                den: den * (i32::from(ext_d) + 1),
            }
            .reduce(),
            _ => Self::UNDEFINED,
        }
    }

    /// 转换为 f64, 分母为 0 时返回 `NAN`
    pub fn to_f64(self) -> f64 {
        if self.den == 0 {
            return f64::NAN;
        }
        f64::from(self.num) / f64::from(self.den)
    }

    /// 约分, 保证分母为正
    pub fn reduce(self) -> Self {
        if self.den == 0 {
            return self;
        }
        let g = gcd(self.num.unsigned_abs(), self.den.unsigned_abs());
        if g == 0 {
            return self;
        }
        let g = g as i32;
        let sign = if self.den < 0 { -1 } else { 1 };
        Self {
            num: sign * self.num / g,
            den: sign * self.den / g,
        }
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

/// 求最大公约数 (欧几里得算法)
fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_rate_codes() {
        assert_eq!(Rational::from_frame_rate_code(4, 0, 0), Rational::new(30000, 1001));
        assert_eq!(Rational::from_frame_rate_code(3, 0, 0), Rational::new(25, 1));
        assert!(!Rational::from_frame_rate_code(0, 0, 0).is_valid());
        assert!(!Rational::from_frame_rate_code(12, 0, 0).is_valid());
    }

    #[test]
    fn test_frame_rate_extension() {
        // 25 * 2 / 1 = 50
        assert_eq!(Rational::from_frame_rate_code(3, 1, 0), Rational::new(50, 1));
    }

    #[test]
    fn test_reduce_and_display() {
        assert_eq!(Rational::new(30, -60).reduce(), Rational::new(-1, 2));
        assert_eq!(format!("{}", Rational::new(30000, 1001)), "30000/1001");
        assert!(Rational::UNDEFINED.to_f64().is_nan());
    }
}
