//! # 元素周期表
//!
//! 元素符号与原子序数的对应关系，用于全电子基组的价电子数推断和元素符号校验。
//!
//! ## 依赖关系
//! - 被 `parsers/` 使用
//! - 无外部模块依赖

const SYMBOLS: [&str; 118] = [
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl",
    "Ar", "K", "Ca", "Sc", "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn", "Ga", "Ge", "As",
    "Se", "Br", "Kr", "Rb", "Sr", "Y", "Zr", "Nb", "Mo", "Tc", "Ru", "Rh", "Pd", "Ag", "Cd", "In",
    "Sn", "Sb", "Te", "I", "Xe", "Cs", "Ba", "La", "Ce", "Pr", "Nd", "Pm", "Sm", "Eu", "Gd", "Tb",
    "Dy", "Ho", "Er", "Tm", "Yb", "Lu", "Hf", "Ta", "W", "Re", "Os", "Ir", "Pt", "Au", "Hg", "Tl",
    "Pb", "Bi", "Po", "At", "Rn", "Fr", "Ra", "Ac", "Th", "Pa", "U", "Np", "Pu", "Am", "Cm", "Bk",
    "Cf", "Es", "Fm", "Md", "No", "Lr", "Rf", "Db", "Sg", "Bh", "Hs", "Mt", "Ds", "Rg", "Cn", "Nh",
    "Fl", "Mc", "Lv", "Ts", "Og",
];

/// 查询原子序数（大小写不敏感）
pub fn atomic_number(symbol: &str) -> Option<u32> {
    SYMBOLS
        .iter()
        .position(|s| s.eq_ignore_ascii_case(symbol))
        .map(|idx| idx as u32 + 1)
}

/// 规范化元素符号大小写，如 `he` -> `He`
pub fn canonical_symbol(symbol: &str) -> Option<&'static str> {
    atomic_number(symbol).map(|z| SYMBOLS[z as usize - 1])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_number() {
        assert_eq!(atomic_number("H"), Some(1));
        assert_eq!(atomic_number("he"), Some(2));
        assert_eq!(atomic_number("Og"), Some(118));
        assert_eq!(atomic_number("Xx"), None);
    }

    #[test]
    fn test_canonical_symbol() {
        assert_eq!(canonical_symbol("LI"), Some("Li"));
        assert_eq!(canonical_symbol("q1"), None);
    }
}
