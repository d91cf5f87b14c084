//! Folder Qualifiers
//!
//! Parses and orders the qualifier part of resource folder names such as
//! `values-fr-rCA` or `drawable-land-hdpi`.

use std::fmt;
use serde::{Deserialize, Serialize};

/// Number of qualifier dimensions in a configuration
pub const QUALIFIER_COUNT: usize = 21;

macro_rules! qualifier_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Parse the folder-name form of this qualifier
            pub fn from_qualifier(value: &str) -> Option<Self> {
                match value {
                    $($text => Some($name::$variant),)+
                    _ => None,
                }
            }

            /// Folder-name form of this qualifier
            pub fn as_qualifier(&self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }
    };
}

qualifier_enum!(
    /// Layout direction
    LayoutDirection { Ltr => "ldltr", Rtl => "ldrtl" }
);

qualifier_enum!(
    /// Generalized screen size
    ScreenSize { Small => "small", Normal => "normal", Large => "large", XLarge => "xlarge" }
);

qualifier_enum!(
    /// Long or regular aspect ratio
    ScreenRatio { Long => "long", NotLong => "notlong" }
);

qualifier_enum!(
    /// Screen orientation
    ScreenOrientation { Portrait => "port", Landscape => "land", Square => "square" }
);

qualifier_enum!(
    /// Docked or device UI mode
    UiMode {
        Car => "car",
        Desk => "desk",
        Television => "television",
        Appliance => "appliance",
        Watch => "watch",
    }
);

qualifier_enum!(
    /// Night mode
    NightMode { NotNight => "notnight", Night => "night" }
);

qualifier_enum!(
    /// Screen pixel density bucket
    Density {
        Ldpi => "ldpi",
        Mdpi => "mdpi",
        Tvdpi => "tvdpi",
        Hdpi => "hdpi",
        Xhdpi => "xhdpi",
        Xxhdpi => "xxhdpi",
        Xxxhdpi => "xxxhdpi",
        Nodpi => "nodpi",
        Anydpi => "anydpi",
    }
);

qualifier_enum!(
    /// Touchscreen type
    TouchScreen { NoTouch => "notouch", Stylus => "stylus", Finger => "finger" }
);

qualifier_enum!(
    /// Keyboard availability
    KeyboardState { Exposed => "keysexposed", Hidden => "keyshidden", Soft => "keyssoft" }
);

qualifier_enum!(
    /// Primary text input method
    TextInput { NoKeys => "nokeys", Qwerty => "qwerty", TwelveKey => "12key" }
);

qualifier_enum!(
    /// Navigation key availability
    NavigationState { Exposed => "navexposed", Hidden => "navhidden" }
);

qualifier_enum!(
    /// Primary non-touch navigation method
    Navigation { NoNav => "nonav", Dpad => "dpad", Trackball => "trackball", Wheel => "wheel" }
);

/// A resource folder configuration
///
/// Fields are declared in qualifier order, so the derived `Ord` compares
/// configurations dimension by dimension with an unset qualifier sorting
/// before any set one. The default configuration therefore sorts first.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FolderConfiguration {
    pub country_code: Option<u16>,
    pub network_code: Option<u16>,
    pub language: Option<String>,
    pub region: Option<String>,
    pub layout_direction: Option<LayoutDirection>,
    pub smallest_width_dp: Option<u32>,
    pub screen_width_dp: Option<u32>,
    pub screen_height_dp: Option<u32>,
    pub screen_size: Option<ScreenSize>,
    pub screen_ratio: Option<ScreenRatio>,
    pub orientation: Option<ScreenOrientation>,
    pub ui_mode: Option<UiMode>,
    pub night_mode: Option<NightMode>,
    pub density: Option<Density>,
    pub touchscreen: Option<TouchScreen>,
    pub keyboard_state: Option<KeyboardState>,
    pub text_input: Option<TextInput>,
    pub navigation_state: Option<NavigationState>,
    pub navigation: Option<Navigation>,
    /// Larger dimension first
    pub screen_dimension: Option<(u32, u32)>,
    pub version: Option<u32>,
}

impl FolderConfiguration {
    /// Configuration with no qualifier set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse qualifier segments, e.g. `["fr", "rCA", "hdpi"]`
    ///
    /// Qualifiers must follow dimension order and appear at most once.
    /// Returns `None` for any unknown or misplaced segment.
    pub fn parse<S: AsRef<str>>(segments: &[S]) -> Option<Self> {
        let mut config = Self::default();
        let mut next = 0;

        for segment in segments {
            let segment = segment.as_ref();
            if segment.is_empty() {
                return None;
            }
            let found = (next..QUALIFIER_COUNT).find(|&dim| config.set_qualifier(dim, segment))?;
            next = found + 1;
        }

        Some(config)
    }

    /// Parse a dash-separated qualifier string, e.g. `fr-rCA-hdpi`
    pub fn from_qualifier_string(qualifiers: &str) -> Option<Self> {
        if qualifiers.is_empty() {
            return Some(Self::default());
        }
        let segments: Vec<&str> = qualifiers.split('-').collect();
        Self::parse(&segments)
    }

    /// True if no qualifier is set
    pub fn is_default(&self) -> bool {
        self.qualifier_count() == 0
    }

    /// Number of qualifiers set
    pub fn qualifier_count(&self) -> usize {
        self.qualifier_strings().len()
    }

    /// Try to set dimension `dim` from `segment`; false if it does not parse
    fn set_qualifier(&mut self, dim: usize, segment: &str) -> bool {
        let lower = segment.to_ascii_lowercase();
        let value = lower.as_str();

        match dim {
            0 => assign(&mut self.country_code, parse_prefixed_number(value, "mcc", 3, 3)
                .and_then(|n| u16::try_from(n).ok())),
            1 => assign(&mut self.network_code, parse_prefixed_number(value, "mnc", 1, 3)
                .and_then(|n| u16::try_from(n).ok())),
            2 => assign(&mut self.language, parse_language(value)),
            3 => assign(&mut self.region, parse_region(segment)),
            4 => assign(&mut self.layout_direction, LayoutDirection::from_qualifier(value)),
            5 => assign(&mut self.smallest_width_dp, parse_dp(value, "sw")),
            6 => assign(&mut self.screen_width_dp, parse_dp(value, "w")),
            7 => assign(&mut self.screen_height_dp, parse_dp(value, "h")),
            8 => assign(&mut self.screen_size, ScreenSize::from_qualifier(value)),
            9 => assign(&mut self.screen_ratio, ScreenRatio::from_qualifier(value)),
            10 => assign(&mut self.orientation, ScreenOrientation::from_qualifier(value)),
            11 => assign(&mut self.ui_mode, UiMode::from_qualifier(value)),
            12 => assign(&mut self.night_mode, NightMode::from_qualifier(value)),
            13 => assign(&mut self.density, Density::from_qualifier(value)),
            14 => assign(&mut self.touchscreen, TouchScreen::from_qualifier(value)),
            15 => assign(&mut self.keyboard_state, KeyboardState::from_qualifier(value)),
            16 => assign(&mut self.text_input, TextInput::from_qualifier(value)),
            17 => assign(&mut self.navigation_state, NavigationState::from_qualifier(value)),
            18 => assign(&mut self.navigation, Navigation::from_qualifier(value)),
            19 => assign(&mut self.screen_dimension, parse_dimension(value)),
            20 => assign(&mut self.version, parse_prefixed_number(value, "v", 1, 4)),
            _ => false,
        }
    }

    /// Folder-name form of each set qualifier, in dimension order
    ///
    /// Values are normalized rather than echoed: network codes are padded to
    /// two digits (`mnc004` becomes `mnc04`) and screen dimensions put the
    /// larger side first, so equal configurations render identically.
    pub fn qualifier_strings(&self) -> Vec<String> {
        let mut out = Vec::new();

        if let Some(mcc) = self.country_code {
            out.push(format!("mcc{:03}", mcc));
        }
        if let Some(mnc) = self.network_code {
            out.push(format!("mnc{:02}", mnc));
        }
        if let Some(language) = &self.language {
            out.push(language.clone());
        }
        if let Some(region) = &self.region {
            out.push(format!("r{}", region));
        }
        if let Some(dir) = self.layout_direction {
            out.push(dir.as_qualifier().to_string());
        }
        if let Some(sw) = self.smallest_width_dp {
            out.push(format!("sw{}dp", sw));
        }
        if let Some(w) = self.screen_width_dp {
            out.push(format!("w{}dp", w));
        }
        if let Some(h) = self.screen_height_dp {
            out.push(format!("h{}dp", h));
        }

        let named = [
            self.screen_size.map(|q| q.as_qualifier()),
            self.screen_ratio.map(|q| q.as_qualifier()),
            self.orientation.map(|q| q.as_qualifier()),
            self.ui_mode.map(|q| q.as_qualifier()),
            self.night_mode.map(|q| q.as_qualifier()),
            self.density.map(|q| q.as_qualifier()),
            self.touchscreen.map(|q| q.as_qualifier()),
            self.keyboard_state.map(|q| q.as_qualifier()),
            self.text_input.map(|q| q.as_qualifier()),
            self.navigation_state.map(|q| q.as_qualifier()),
            self.navigation.map(|q| q.as_qualifier()),
        ];
        out.extend(named.iter().flatten().map(|q| q.to_string()));

        if let Some((large, small)) = self.screen_dimension {
            out.push(format!("{}x{}", large, small));
        }
        if let Some(version) = self.version {
            out.push(format!("v{}", version));
        }

        out
    }
}

/// Normalized folder suffix, see [`FolderConfiguration::qualifier_strings`]
impl fmt::Display for FolderConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualifier_strings().join("-"))
    }
}

fn assign<T>(slot: &mut Option<T>, value: Option<T>) -> bool {
    match value {
        Some(value) => {
            *slot = Some(value);
            true
        }
        None => false,
    }
}

fn parse_number(digits: &str, min_len: usize, max_len: usize) -> Option<u32> {
    if digits.len() < min_len || digits.len() > max_len {
        return None;
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn parse_prefixed_number(value: &str, prefix: &str, min_len: usize, max_len: usize) -> Option<u32> {
    value
        .strip_prefix(prefix)
        .and_then(|digits| parse_number(digits, min_len, max_len))
}

fn parse_dp(value: &str, prefix: &str) -> Option<u32> {
    value
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_suffix("dp"))
        .and_then(|digits| parse_number(digits, 1, 5))
}

fn parse_language(value: &str) -> Option<String> {
    (value.len() == 2 && value.bytes().all(|b| b.is_ascii_lowercase()))
        .then(|| value.to_string())
}

fn parse_region(segment: &str) -> Option<String> {
    let code = segment.strip_prefix('r')?;
    (code.len() == 2 && code.bytes().all(|b| b.is_ascii_uppercase()))
        .then(|| code.to_string())
}

fn parse_dimension(value: &str) -> Option<(u32, u32)> {
    let (a, b) = value.split_once('x')?;
    let a = parse_number(a, 1, 5)?;
    let b = parse_number(b, 1, 5)?;
    Some((a.max(b), a.min(b)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = FolderConfiguration::from_qualifier_string("").unwrap();
        assert!(config.is_default());
        assert_eq!(config.qualifier_count(), 0);
        assert_eq!(config.to_string(), "");
    }

    #[test]
    fn test_parse_locale_and_density() {
        let config = FolderConfiguration::from_qualifier_string("fr-rCA-hdpi").unwrap();
        assert_eq!(config.language.as_deref(), Some("fr"));
        assert_eq!(config.region.as_deref(), Some("CA"));
        assert_eq!(config.density, Some(Density::Hdpi));
        assert_eq!(config.qualifier_count(), 3);
        assert!(!config.is_default());
        assert_eq!(config.to_string(), "fr-rCA-hdpi");
    }

    #[test]
    fn test_parse_full_range() {
        let config = FolderConfiguration::from_qualifier_string(
            "mcc310-mnc004-en-rUS-ldrtl-sw600dp-w720dp-h480dp-large-long-land-car-night-xhdpi-finger-keyssoft-nokeys-navhidden-dpad-240x320-v21",
        )
        .unwrap();

        assert_eq!(config.country_code, Some(310));
        assert_eq!(config.network_code, Some(4));
        assert_eq!(config.smallest_width_dp, Some(600));
        assert_eq!(config.screen_dimension, Some((320, 240)));
        assert_eq!(config.version, Some(21));
        assert_eq!(config.qualifier_count(), QUALIFIER_COUNT);
        assert_eq!(
            config.to_string(),
            "mcc310-mnc04-en-rUS-ldrtl-sw600dp-w720dp-h480dp-large-long-land-car-night-xhdpi-finger-keyssoft-nokeys-navhidden-dpad-320x240-v21"
        );
    }

    #[test]
    fn test_network_code_normalized() {
        let padded = FolderConfiguration::from_qualifier_string("mcc310-mnc004").unwrap();
        let short = FolderConfiguration::from_qualifier_string("mcc310-mnc4").unwrap();

        assert_eq!(padded, short);
        assert_eq!(padded.to_string(), "mcc310-mnc04");
        assert_eq!(
            FolderConfiguration::from_qualifier_string(&padded.to_string()),
            Some(padded)
        );
    }

    #[test]
    fn test_case_handling() {
        let config = FolderConfiguration::from_qualifier_string("LAND-HDPI").unwrap();
        assert_eq!(config.orientation, Some(ScreenOrientation::Landscape));
        assert_eq!(config.density, Some(Density::Hdpi));

        // Region codes must be uppercase.
        assert!(FolderConfiguration::from_qualifier_string("fr-rca").is_none());
    }

    #[test]
    fn test_rejects_out_of_order_and_unknown() {
        assert!(FolderConfiguration::from_qualifier_string("hdpi-land").is_none());
        assert!(FolderConfiguration::from_qualifier_string("land-land").is_none());
        assert!(FolderConfiguration::from_qualifier_string("bogus").is_none());
        assert!(FolderConfiguration::from_qualifier_string("fr--hdpi").is_none());
        assert!(FolderConfiguration::from_qualifier_string("mcc31").is_none());
    }

    #[test]
    fn test_ordering() {
        let default = FolderConfiguration::default();
        let fr = FolderConfiguration::from_qualifier_string("fr").unwrap();
        let de = FolderConfiguration::from_qualifier_string("de").unwrap();
        let land = FolderConfiguration::from_qualifier_string("land").unwrap();
        let fr_land = FolderConfiguration::from_qualifier_string("fr-land").unwrap();
        let mdpi = FolderConfiguration::from_qualifier_string("mdpi").unwrap();
        let hdpi = FolderConfiguration::from_qualifier_string("hdpi").unwrap();

        assert!(default < fr);
        assert!(default < land);
        assert!(de < fr);
        // Earlier dimensions dominate later ones.
        assert!(land < fr);
        assert!(fr < fr_land);
        assert!(mdpi < hdpi);
    }
}
