use std::fmt;

use normalize::Nutrition;
use serde::{Deserialize, Serialize};

/// Summed nutrition across a meal. Values are unrounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NutritionTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: f64,
    pub sodium: f64,
}

impl NutritionTotals {
    /// Accumulate `nutrition * factor`.
    pub fn add_scaled(&mut self, nutrition: &Nutrition, factor: f64) {
        self.calories += nutrition.calories * factor;
        self.protein += nutrition.protein * factor;
        self.carbs += nutrition.carbs * factor;
        self.fat += nutrition.fat * factor;
        self.sugar += nutrition.sugar * factor;
        self.sodium += nutrition.sodium * factor;
    }

    /// Presentation rounding: whole kcal and mg, one decimal for grams.
    pub fn display(&self) -> DisplayTotals {
        DisplayTotals {
            calories: round_half_up(self.calories),
            protein: one_decimal(self.protein),
            carbs: one_decimal(self.carbs),
            fat: one_decimal(self.fat),
            sugar: one_decimal(self.sugar),
            sodium: round_half_up(self.sodium),
        }
    }
}

/// Totals formatted for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayTotals {
    pub calories: i64,
    pub protein: String,
    pub carbs: String,
    pub fat: String,
    pub sugar: String,
    pub sodium: i64,
}

impl fmt::Display for DisplayTotals {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} kcal | protein {} g | carbs {} g | fat {} g | sugar {} g | sodium {} mg",
            self.calories, self.protein, self.carbs, self.fat, self.sugar, self.sodium
        )
    }
}

/// Round to the nearest integer with ties going up.
pub fn round_half_up(value: f64) -> i64 {
    // `as` saturates for out-of-range floats.
    (value + 0.5).floor() as i64
}

/// Fixed one-decimal rendering of the exact decimal value of `value`.
///
/// Only quarter values (`x.25`, `x.75`) sit exactly on a tie; those round
/// away from zero. Everything else takes the nearest tenth, so `1.45` (stored
/// just below 1.45) renders as `"1.4"`.
fn one_decimal(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let magnitude = value.abs();
    let scaled = magnitude * 10.0;
    if (magnitude * 4.0).fract() == 0.0 && scaled.fract() == 0.5 {
        // `as` saturates for out-of-range floats.
        let tenths = scaled.floor() as u64 + 1;
        return format!("{sign}{}.{}", tenths / 10, tenths % 10);
    }
    format!("{sign}{magnitude:.1}")
}
