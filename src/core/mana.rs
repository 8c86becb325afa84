//! Mana system for casting spells

use crate::error::RuleViolation;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mana colors (the five colors plus colorless)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
    Colorless,
}

impl Color {
    /// WUBRG then colorless; the order colored requirements are checked in
    pub const ALL: [Color; 6] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Colorless,
    ];

    /// Order in which leftover mana is spent on generic costs
    pub const GENERIC_PAYMENT_ORDER: [Color; 6] = [
        Color::Colorless,
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    /// Parse a single mana symbol ("G", "{G}", "g")
    pub fn from_symbol(symbol: &str) -> Option<Color> {
        let trimmed = symbol.trim().trim_start_matches('{').trim_end_matches('}');
        match trimmed.to_ascii_uppercase().as_str() {
            "W" => Some(Color::White),
            "U" => Some(Color::Blue),
            "B" => Some(Color::Black),
            "R" => Some(Color::Red),
            "G" => Some(Color::Green),
            "C" => Some(Color::Colorless),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Blue => "blue",
            Color::Black => "black",
            Color::Red => "red",
            Color::Green => "green",
            Color::Colorless => "colorless",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "W"),
            Color::Blue => write!(f, "U"),
            Color::Black => write!(f, "B"),
            Color::Red => write!(f, "R"),
            Color::Green => write!(f, "G"),
            Color::Colorless => write!(f, "C"),
        }
    }
}

/// Represents a mana cost (e.g., "2RR" = 2 generic + 2 red)
/// Copy-eligible since it's just 7 u8 fields (7 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManaCost {
    pub generic: u8,
    pub white: u8,
    pub blue: u8,
    pub black: u8,
    pub red: u8,
    pub green: u8,
    pub colorless: u8,
}

impl ManaCost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a mana cost string like "2RR", "1UB" or "{2}{G}{G}"
    ///
    /// Braces are ignored, digits accumulate into the generic part and
    /// unknown symbols (X, hybrid slashes) are skipped. Every part saturates
    /// at `u8::MAX` rather than wrapping.
    pub fn from_string(s: &str) -> Self {
        let mut cost = ManaCost::new();

        for c in s.chars() {
            let slot = match c {
                'W' => &mut cost.white,
                'U' => &mut cost.blue,
                'B' => &mut cost.black,
                'R' => &mut cost.red,
                'G' => &mut cost.green,
                'C' => &mut cost.colorless,
                '0'..='9' => {
                    let digit = c as u8 - b'0';
                    cost.generic = cost.generic.saturating_mul(10).saturating_add(digit);
                    continue;
                }
                _ => continue,
            };
            *slot = slot.saturating_add(1);
        }

        cost
    }

    /// Required amount of one specific color
    pub fn amount(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Colorless => self.colorless,
        }
    }

    /// Sum of all color-specific requirements
    pub fn colored_total(&self) -> u8 {
        Color::ALL
            .iter()
            .fold(0u8, |sum, &c| sum.saturating_add(self.amount(c)))
    }

    /// Total converted mana cost
    pub fn cmc(&self) -> u8 {
        self.generic.saturating_add(self.colored_total())
    }

    pub fn is_free(&self) -> bool {
        self.cmc() == 0
    }
}

impl fmt::Display for ManaCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.generic > 0 || self.colored_total() == 0 {
            write!(f, "{}", self.generic)?;
        }
        for color in Color::ALL {
            for _ in 0..self.amount(color) {
                write!(f, "{color}")?;
            }
        }
        Ok(())
    }
}

/// Mana pool for a player
/// Copy-eligible since it's just 6 u8 fields (6 bytes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManaPool {
    pub white: u8,
    pub blue: u8,
    pub black: u8,
    pub red: u8,
    pub green: u8,
    pub colorless: u8,
}

impl ManaPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn amount(&self, color: Color) -> u8 {
        match color {
            Color::White => self.white,
            Color::Blue => self.blue,
            Color::Black => self.black,
            Color::Red => self.red,
            Color::Green => self.green,
            Color::Colorless => self.colorless,
        }
    }

    fn amount_mut(&mut self, color: Color) -> &mut u8 {
        match color {
            Color::White => &mut self.white,
            Color::Blue => &mut self.blue,
            Color::Black => &mut self.black,
            Color::Red => &mut self.red,
            Color::Green => &mut self.green,
            Color::Colorless => &mut self.colorless,
        }
    }

    pub fn add_color(&mut self, color: Color) {
        let entry = self.amount_mut(color);
        *entry = entry.saturating_add(1);
    }

    pub fn clear(&mut self) {
        *self = ManaPool::new();
    }

    /// Work out the pool that would remain after paying `cost`
    ///
    /// Colored requirements are taken first, then the generic part is paid
    /// from what is left in `Color::GENERIC_PAYMENT_ORDER`. This is the only
    /// payment algorithm: legality checks and real payments both go through
    /// it, so a cost judged payable can always be paid.
    pub fn try_pay(&self, cost: &ManaCost) -> Result<ManaPool, RuleViolation> {
        let mut remaining = *self;

        for color in Color::ALL {
            let required = cost.amount(color);
            let available = remaining.amount(color);
            if available < required {
                return Err(RuleViolation::InsufficientMana {
                    color: Some(color),
                    shortfall: required - available,
                });
            }
            *remaining.amount_mut(color) -= required;
        }

        let leftover = remaining.total();
        if leftover < cost.generic {
            return Err(RuleViolation::InsufficientMana {
                color: None,
                shortfall: cost.generic - leftover,
            });
        }

        let mut generic_remaining = cost.generic;
        for color in Color::GENERIC_PAYMENT_ORDER {
            let entry = remaining.amount_mut(color);
            let used = generic_remaining.min(*entry);
            *entry -= used;
            generic_remaining -= used;
        }
        debug_assert_eq!(generic_remaining, 0, "Failed to pay generic cost");

        Ok(remaining)
    }

    /// Check if we can pay the given mana cost
    pub fn can_pay(&self, cost: &ManaCost) -> bool {
        self.try_pay(cost).is_ok()
    }

    /// Pay a mana cost from this pool
    ///
    /// The pool is left untouched when the cost cannot be paid.
    pub fn pay_cost(&mut self, cost: &ManaCost) -> Result<(), RuleViolation> {
        *self = self.try_pay(cost)?;
        Ok(())
    }

    /// Total mana in pool
    pub fn total(&self) -> u8 {
        Color::ALL
            .iter()
            .fold(0u8, |sum, &c| sum.saturating_add(self.amount(c)))
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl fmt::Display for ManaPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}W {}U {}B {}R {}G {}C",
            self.white, self.blue, self.black, self.red, self.green, self.colorless
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mana_cost_parsing() {
        let cost = ManaCost::from_string("2RR");
        assert_eq!(cost.generic, 2);
        assert_eq!(cost.red, 2);
        assert_eq!(cost.cmc(), 4);

        let cost2 = ManaCost::from_string("{1}{U}{B}");
        assert_eq!(cost2.generic, 1);
        assert_eq!(cost2.blue, 1);
        assert_eq!(cost2.black, 1);
        assert_eq!(cost2.cmc(), 3);

        let cost3 = ManaCost::from_string("{X}{G}");
        assert_eq!(cost3.generic, 0);
        assert_eq!(cost3.green, 1);

        assert!(ManaCost::from_string("").is_free());
        assert_eq!(ManaCost::from_string("{10}").generic, 10);
    }

    #[test]
    fn test_oversized_costs_saturate() {
        let huge = ManaCost::from_string("{300}");
        assert_eq!(huge.generic, u8::MAX);
        assert!(!huge.is_free());
        assert!(!ManaPool::new().can_pay(&huge));

        let cost = ManaCost::from_string("{250}{G}{G}{G}{G}{G}{G}");
        assert_eq!(cost.generic, 250);
        assert_eq!(cost.green, 6);
        assert_eq!(cost.colored_total(), 6);
        assert_eq!(cost.cmc(), u8::MAX);

        let greens = "G".repeat(300);
        let cost = ManaCost::from_string(&greens);
        assert_eq!(cost.green, u8::MAX);
        assert_eq!(cost.cmc(), u8::MAX);
    }

    #[test]
    fn test_mana_cost_display() {
        assert_eq!(ManaCost::from_string("{2}{G}{G}").to_string(), "2GG");
        assert_eq!(ManaCost::from_string("WU").to_string(), "WU");
        assert_eq!(ManaCost::new().to_string(), "0");
    }

    #[test]
    fn test_color_symbols() {
        assert_eq!(Color::from_symbol("G"), Some(Color::Green));
        assert_eq!(Color::from_symbol("{u}"), Some(Color::Blue));
        assert_eq!(Color::from_symbol("C"), Some(Color::Colorless));
        assert_eq!(Color::from_symbol("X"), None);
    }

    #[test]
    fn test_mana_pool() {
        let mut pool = ManaPool::new();
        pool.add_color(Color::Red);
        pool.add_color(Color::Red);
        pool.add_color(Color::Blue);

        assert_eq!(pool.red, 2);
        assert_eq!(pool.blue, 1);

        assert!(pool.can_pay(&ManaCost::from_string("1R")));
        assert!(pool.can_pay(&ManaCost::from_string("2R")));
        assert!(!pool.can_pay(&ManaCost::from_string("3R")));
        assert!(!pool.can_pay(&ManaCost::from_string("RRR")));
    }

    #[test]
    fn test_try_pay_reports_colored_shortfall() {
        let mut pool = ManaPool::new();
        pool.add_color(Color::Blue);
        pool.add_color(Color::Blue);

        let err = pool.try_pay(&ManaCost::from_string("RR")).unwrap_err();
        assert_eq!(
            err,
            RuleViolation::InsufficientMana {
                color: Some(Color::Red),
                shortfall: 2
            }
        );
    }

    #[test]
    fn test_try_pay_reports_generic_shortfall() {
        let pool = ManaPool::new();
        let err = pool.try_pay(&ManaCost::from_string("2")).unwrap_err();
        assert_eq!(
            err,
            RuleViolation::InsufficientMana {
                color: None,
                shortfall: 2
            }
        );
        assert!(err.to_string().contains("insufficient"));
    }

    #[test]
    fn test_generic_spends_colorless_first() {
        let mut pool = ManaPool::new();
        pool.add_color(Color::Green);
        pool.add_color(Color::Colorless);
        pool.add_color(Color::White);

        // 1 generic: colorless goes before any color
        pool.pay_cost(&ManaCost::from_string("1")).unwrap();
        assert_eq!(pool.colorless, 0);
        assert_eq!(pool.white, 1);
        assert_eq!(pool.green, 1);

        // next generic comes out of white before green (WUBRG)
        pool.pay_cost(&ManaCost::from_string("1")).unwrap();
        assert_eq!(pool.white, 0);
        assert_eq!(pool.green, 1);
    }

    #[test]
    fn test_pay_cost_complex() {
        let mut pool = ManaPool::new();
        pool.add_color(Color::Red);
        pool.add_color(Color::Red);
        pool.add_color(Color::Red);
        pool.add_color(Color::Blue);

        // R from red, then generic 2 from blue then red
        pool.pay_cost(&ManaCost::from_string("2R")).unwrap();
        assert_eq!(pool.red, 1);
        assert_eq!(pool.blue, 0);
        assert_eq!(pool.total(), 1);
    }

    #[test]
    fn test_pay_cost_insufficient_leaves_pool_unchanged() {
        let mut pool = ManaPool::new();
        pool.add_color(Color::Red);

        assert!(pool.pay_cost(&ManaCost::from_string("2R")).is_err());
        assert_eq!(pool.red, 1);
        assert_eq!(pool.total(), 1);
    }

    #[test]
    fn test_mana_pool_total_and_clear() {
        let mut pool = ManaPool::new();
        assert!(pool.is_empty());

        pool.add_color(Color::Red);
        pool.add_color(Color::Blue);
        pool.add_color(Color::White);
        assert_eq!(pool.total(), 3);
        assert_eq!(pool.to_string(), "1W 1U 0B 1R 0G 0C");

        pool.clear();
        assert_eq!(pool.total(), 0);
    }
}
