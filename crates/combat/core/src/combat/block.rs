//! Block calculation: base plus Dexterity, then Frail, floored once.

/// Modifiers for one block gain.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BlockCalc {
    pub additive: i32,
    pub factors: Vec<f32>,
}

impl BlockCalc {
    /// Final block from `base`, never negative.
    pub fn compute(&self, base: i32) -> i32 {
        let mut value = (base + self.additive) as f32;
        for factor in &self.factors {
            value *= factor;
        }
        (value.floor() as i32).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dexterity_then_frail() {
        let calc = BlockCalc {
            additive: 2,
            factors: vec![0.75],
        };
        // floor((5 + 2) * 0.75) = floor(5.25)
        assert_eq!(calc.compute(5), 5);
    }

    #[test]
    fn negative_dexterity_floors_at_zero() {
        let calc = BlockCalc {
            additive: -8,
            factors: vec![],
        };
        assert_eq!(calc.compute(5), 0);
    }
}
