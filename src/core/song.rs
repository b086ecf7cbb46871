/// A single step of a song: the tone to sound and how long to hold it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Note {
    pub frequency: f32,
    pub duration_ms: u64,
}

const fn note(frequency: f32, duration_ms: u64) -> Note {
    Note {
        frequency,
        duration_ms,
    }
}

/// An immutable, titled sequence of notes. Songs are static data and are
/// never mutated at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Song {
    pub title: &'static str,
    pub notes: &'static [Note],
}

const TWINKLE_TWINKLE: &[Note] = &[
    note(261.63, 500),  // C4
    note(261.63, 500),  // C4
    note(392.00, 500),  // G4
    note(392.00, 500),  // G4
    note(440.00, 500),  // A4
    note(440.00, 500),  // A4
    note(392.00, 1000), // G4
    note(349.23, 500),  // F4
    note(349.23, 500),  // F4
    note(329.63, 500),  // E4
    note(329.63, 500),  // E4
    note(293.66, 500),  // D4
    note(293.66, 500),  // D4
    note(261.63, 1000), // C4
];

const MARY_HAD_A_LITTLE_LAMB: &[Note] = &[
    note(329.63, 500),  // E4
    note(293.66, 500),  // D4
    note(261.63, 500),  // C4
    note(293.66, 500),  // D4
    note(329.63, 500),  // E4
    note(329.63, 500),  // E4
    note(329.63, 1000), // E4
    note(293.66, 500),  // D4
    note(293.66, 500),  // D4
    note(293.66, 1000), // D4
    note(329.63, 500),  // E4
    note(392.00, 500),  // G4
    note(392.00, 1000), // G4
];

const ODE_TO_JOY: &[Note] = &[
    note(329.63, 500),  // E4
    note(329.63, 500),  // E4
    note(349.23, 500),  // F4
    note(392.00, 500),  // G4
    note(392.00, 500),  // G4
    note(349.23, 500),  // F4
    note(329.63, 500),  // E4
    note(293.66, 500),  // D4
    note(261.63, 500),  // C4
    note(261.63, 500),  // C4
    note(293.66, 500),  // D4
    note(329.63, 500),  // E4
    note(329.63, 750),  // E4
    note(293.66, 250),  // D4
    note(293.66, 1000), // D4
];

/// The built-in song library shown in the Songs window.
pub const SONGS: &[Song] = &[
    Song {
        title: "Twinkle, Twinkle Little Star",
        notes: TWINKLE_TWINKLE,
    },
    Song {
        title: "Mary Had a Little Lamb",
        notes: MARY_HAD_A_LITTLE_LAMB,
    },
    Song {
        title: "Ode to Joy",
        notes: ODE_TO_JOY,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyColor {
    White,
    Black,
}

/// One key of the on-screen keyboard.
#[derive(Debug, Clone, PartialEq)]
pub struct PianoKey {
    pub name: String,
    pub frequency: f32,
    pub color: KeyColor,
}

const FIRST_OCTAVE: &[(&str, f32, KeyColor)] = &[
    ("C4", 261.63, KeyColor::White),
    ("C#4", 277.18, KeyColor::Black),
    ("D4", 293.66, KeyColor::White),
    ("D#4", 311.13, KeyColor::Black),
    ("E4", 329.63, KeyColor::White),
    ("F4", 349.23, KeyColor::White),
    ("F#4", 369.99, KeyColor::Black),
    ("G4", 392.00, KeyColor::White),
    ("G#4", 415.30, KeyColor::Black),
    ("A4", 440.00, KeyColor::White),
    ("A#4", 466.16, KeyColor::Black),
    ("B4", 493.88, KeyColor::White),
];

/// Two octaves, C4 through B5. The upper octave is the lower one with the
/// frequencies doubled.
pub fn keyboard_keys() -> Vec<PianoKey> {
    let mut keys: Vec<PianoKey> = FIRST_OCTAVE
        .iter()
        .map(|&(name, frequency, color)| PianoKey {
            name: name.to_string(),
            frequency,
            color,
        })
        .collect();
    keys.extend(FIRST_OCTAVE.iter().map(|&(name, frequency, color)| PianoKey {
        name: name.replace('4', "5"),
        frequency: frequency * 2.0,
        color,
    }));
    keys
}
