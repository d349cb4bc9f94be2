//! Generic positioning functions
//!
//! Names describe where the element ends up relative to the target:
//! `left-bottom` places it left of the target, growing downwards from the
//! target's top edge; `south` centres it below the target.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::position::{PositioningFunction, PositioningFunctionResult};
use crate::rect::Rect;

pub fn left_bottom(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::LeftBottom.place(target, element)
}

pub fn right_bottom(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::RightBottom.place(target, element)
}

pub fn left_top(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::LeftTop.place(target, element)
}

pub fn right_top(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::RightTop.place(target, element)
}

pub fn north(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::North.place(target, element)
}

pub fn south(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::South.place(target, element)
}

pub fn east(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::East.place(target, element)
}

pub fn west(
    target: &Rect,
    element: &Rect,
    _viewport: &Rect,
    _limiter: Option<&Rect>,
) -> Option<PositioningFunctionResult> {
    Preset::West.place(target, element)
}

/// Unknown preset name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown position preset: {0:?}")]
pub struct UnknownPresetError(pub String);

/// Named placement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    LeftBottom,
    RightBottom,
    LeftTop,
    RightTop,
    North,
    South,
    East,
    West,
}

impl Preset {
    pub const ALL: [Preset; 8] = [
        Preset::LeftBottom,
        Preset::RightBottom,
        Preset::LeftTop,
        Preset::RightTop,
        Preset::North,
        Preset::South,
        Preset::East,
        Preset::West,
    ];

    /// Name reported in the chosen position
    pub fn name(self) -> &'static str {
        match self {
            Self::LeftBottom => "left-bottom",
            Self::RightBottom => "right-bottom",
            Self::LeftTop => "left-top",
            Self::RightTop => "right-top",
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
        }
    }

    /// Top-left corner of the element for this placement
    pub fn coordinates(self, target: &Rect, element: &Rect) -> (f64, f64) {
        let center_left = target.left + target.width / 2.0 - element.width / 2.0;
        let center_top = target.top + target.height / 2.0 - element.height / 2.0;

        match self {
            Self::LeftBottom => (target.top, target.left - element.width),
            Self::RightBottom => (target.top, target.left + target.width),
            Self::LeftTop => (target.top - element.height, target.left - element.width),
            Self::RightTop => (target.top - element.height, target.left + target.width),
            Self::North => (target.top - element.height, center_left),
            Self::South => (target.bottom, center_left),
            Self::East => (center_top, target.right),
            Self::West => (center_top, target.left - element.width),
        }
    }

    fn place(self, target: &Rect, element: &Rect) -> Option<PositioningFunctionResult> {
        let (top, left) = self.coordinates(target, element);
        Some(PositioningFunctionResult::new(self.name(), top, left))
    }

    /// Boxed positioning function for `OptimalPositionOptions::positions`
    pub fn function(self) -> Box<PositioningFunction> {
        match self {
            Self::LeftBottom => Box::new(left_bottom),
            Self::RightBottom => Box::new(right_bottom),
            Self::LeftTop => Box::new(left_top),
            Self::RightTop => Box::new(right_top),
            Self::North => Box::new(north),
            Self::South => Box::new(south),
            Self::East => Box::new(east),
            Self::West => Box::new(west),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = UnknownPresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.name() == s)
            .ok_or_else(|| UnknownPresetError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rect::RectData;

    fn target() -> Rect {
        Rect::from_data(RectData::from_xywh(100.0, 100.0, 10.0, 10.0))
    }

    fn element() -> Rect {
        Rect::from_data(RectData::from_xywh(0.0, 0.0, 20.0, 20.0))
    }

    #[test]
    fn test_coordinates() {
        let (t, e) = (target(), element());

        assert_eq!(Preset::LeftBottom.coordinates(&t, &e), (100.0, 80.0));
        assert_eq!(Preset::RightBottom.coordinates(&t, &e), (100.0, 110.0));
        assert_eq!(Preset::LeftTop.coordinates(&t, &e), (80.0, 80.0));
        assert_eq!(Preset::RightTop.coordinates(&t, &e), (80.0, 110.0));
        assert_eq!(Preset::North.coordinates(&t, &e), (80.0, 95.0));
        assert_eq!(Preset::South.coordinates(&t, &e), (110.0, 95.0));
        assert_eq!(Preset::East.coordinates(&t, &e), (95.0, 110.0));
        assert_eq!(Preset::West.coordinates(&t, &e), (95.0, 80.0));
    }

    #[test]
    fn test_function_reports_name() {
        let (t, e) = (target(), element());
        let viewport = Rect::from_data(RectData::from_xywh(0.0, 0.0, 1000.0, 1000.0));

        for preset in Preset::ALL {
            let result = preset.function()(&t, &e, &viewport, None).unwrap();
            assert_eq!(result.name, preset.name());
            assert_eq!((result.top, result.left), preset.coordinates(&t, &e));
        }
    }

    #[test]
    fn test_parse_names() {
        for preset in Preset::ALL {
            assert_eq!(preset.to_string().parse::<Preset>(), Ok(preset));
        }
        assert_eq!("up".parse::<Preset>(), Err(UnknownPresetError("up".to_string())));

        let parsed: Preset = serde_json::from_str("\"right-top\"").unwrap();
        assert_eq!(parsed, Preset::RightTop);
    }
}
