//! Music theory helpers for presenting detected keys
//!
//! The circle of fifths here is a fixed layout order, not something computed
//! from the analysis. Key parsing only serves the secondary labels (relative
//! key, Camelot code) shown next to the detected key.

/// Circle-of-fifths labels, clockwise from 12 o'clock
pub const CIRCLE_OF_FIFTHS: [&str; 12] = [
    "C", "G", "D", "A", "E", "B", "F#/Gb", "Db", "Ab", "Eb", "Bb", "F",
];

/// Whether a circle label should be highlighted for the detected key
///
/// Matching is by substring so that a shared enharmonic label such as
/// "F#/Gb" lights up for either spelling. An empty key matches nothing.
pub fn is_active_label(label: &str, key: &str) -> bool {
    !key.is_empty() && label.contains(key)
}

/// Indices into [`CIRCLE_OF_FIFTHS`] that are highlighted for `key`
pub fn active_positions(key: &str) -> Vec<usize> {
    CIRCLE_OF_FIFTHS
        .iter()
        .enumerate()
        .filter(|(_, label)| is_active_label(label, key))
        .map(|(i, _)| i)
        .collect()
}

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// Musical key with root note and scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MusicalKey {
    /// Root note as semitone offset from C (0=C, 1=C#, ..., 11=B)
    pub root: u8,
    /// true = minor, false = major
    pub minor: bool,
}

impl MusicalKey {
    pub const fn new(root: u8, minor: bool) -> Self {
        Self {
            root: root % 12,
            minor,
        }
    }

    /// Parse a tonic like "C", "F#", "Bb" together with a scale name
    ///
    /// The scale counts as minor when it starts with "min" (any case) or
    /// when the tonic itself carries an "m" suffix ("Am").
    pub fn from_analysis(key: &str, scale: &str) -> Option<Self> {
        let key = key.trim();
        let mut chars = key.chars().peekable();

        let base_root: u8 = match chars.next()?.to_ascii_uppercase() {
            'C' => 0,
            'D' => 2,
            'E' => 4,
            'F' => 5,
            'G' => 7,
            'A' => 9,
            'B' => 11,
            _ => return None,
        };

        let root = match chars.peek() {
            Some('#') => {
                chars.next();
                (base_root + 1) % 12
            }
            Some('b') => {
                chars.next();
                (base_root + 11) % 12
            }
            _ => base_root,
        };

        let suffix: String = chars.collect::<String>().to_lowercase();
        let minor = suffix.starts_with('m') || scale.trim().to_lowercase().starts_with("min");

        Some(Self { root, minor })
    }

    /// Relative major/minor (3 semitones up from minor, down from major)
    pub fn relative(&self) -> Self {
        if self.minor {
            Self::new(self.root + 3, false)
        } else {
            Self::new(self.root + 9, true)
        }
    }

    /// Camelot wheel code, e.g. "8B" for C major, "8A" for A minor
    pub fn camelot(&self) -> String {
        const MAJOR: [u8; 12] = [8, 3, 10, 5, 12, 7, 2, 9, 4, 11, 6, 1];
        const MINOR: [u8; 12] = [5, 12, 7, 2, 9, 4, 11, 6, 1, 8, 3, 10];

        let (position, letter) = if self.minor {
            (MINOR[self.root as usize], 'A')
        } else {
            (MAJOR[self.root as usize], 'B')
        };
        format!("{}{}", position, letter)
    }

    /// Index of this key's root on [`CIRCLE_OF_FIFTHS`]
    pub fn circle_position(&self) -> usize {
        (self.root as usize * 7) % 12
    }
}

impl std::fmt::Display for MusicalKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let note = NOTE_NAMES[self.root as usize];
        if self.minor {
            write!(f, "{}m", note)
        } else {
            write!(f, "{}", note)
        }
    }
}
