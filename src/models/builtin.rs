//! Layouts shipped with the application.
//!
//! Used to seed an empty layout store on first run.

use crate::models::layout::{Layout, RowGrid};

type Grid = &'static [&'static [&'static str]];

/// Key, display name, lowercase grid, uppercase grid.
const BUILTIN: &[(&str, &str, Grid, Grid)] = &[
    ("qy", "QWERTY", QWERTY_LOWERCASE, QWERTY_UPPERCASE),
    ("ay", "AZERTY", AZERTY_LOWERCASE, AZERTY_UPPERCASE),
    ("ck", "Colemak", COLEMAK_LOWERCASE, COLEMAK_UPPERCASE),
    ("dk", "Dvorak", DVORAK_LOWERCASE, DVORAK_UPPERCASE),
    ("jn", "JCUKEN", JCUKEN_LOWERCASE, JCUKEN_UPPERCASE),
    ("qz", "QWERTZ", QWERTZ_LOWERCASE, QWERTZ_UPPERCASE),
    ("wn", "Workman", WORKMAN_LOWERCASE, WORKMAN_UPPERCASE),
];

/// Key of the layout used when a request names none.
pub const DEFAULT_LAYOUT_KEY: &str = "qy";

fn to_grid(grid: Grid) -> RowGrid {
    grid.iter()
        .map(|row| row.iter().map(|slot| (*slot).to_string()).collect())
        .collect()
}

/// Returns the built-in layouts in display order.
#[must_use]
pub fn builtin_layouts() -> Vec<Layout> {
    BUILTIN
        .iter()
        .map(|(key, name, lower, upper)| Layout::new(*key, *name, to_grid(lower), to_grid(upper)))
        .collect()
}

const QWERTY_LOWERCASE: Grid = &[
    &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="],
    &["q", "w", "e", "r", "t", "y", "u", "i", "o", "p", "[", "]", "\\"],
    &["a", "s", "d", "f", "g", "h", "j", "k", "l", ";", "'", " "],
    &["z", "x", "c", "v", "b", "n", "m", ",", ".", "/", " ", " "],
];

const QWERTY_UPPERCASE: Grid = &[
    &["~", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "_", "+"],
    &["Q", "W", "E", "R", "T", "Y", "U", "I", "O", "P", "{", "}", "|"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", ":", "\"", " "],
    &["Z", "X", "C", "V", "B", "N", "M", "<", ">", "?", " ", " "],
];

const AZERTY_LOWERCASE: Grid = &[
    &["²", "&", "é", "\"", "'", "(", "-", "è", "_", "ç", "à", ")", "="],
    &["a", "z", "e", "r", "t", "y", "u", "i", "o", "p", "^", "$", "\\"],
    &["q", "s", "d", "f", "g", "h", "j", "k", "l", "m", "ù", "*"],
    &["w", "x", "c", "v", "b", "n", ",", ";", ":", "!", " ", " "],
];

const AZERTY_UPPERCASE: Grid = &[
    &["³", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "°", "+"],
    &["A", "Z", "E", "R", "T", "Y", "U", "I", "O", "P", "¨", "£", "µ"],
    &["Q", "S", "D", "F", "G", "H", "J", "K", "L", "M", "%", "¤"],
    &["W", "X", "C", "V", "B", "N", "?", ".", "/", "§", " ", " "],
];

const COLEMAK_LOWERCASE: Grid = &[
    &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="],
    &["q", "w", "f", "p", "g", "j", "l", "u", "y", ";", "[", "]", "\\"],
    &["a", "r", "s", "t", "d", "h", "n", "e", "i", "o", "'", " "],
    &["z", "x", "c", "v", "b", "k", "m", ",", ".", "/", " ", " "],
];

const COLEMAK_UPPERCASE: Grid = &[
    &["~", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "_", "+"],
    &["Q", "W", "F", "P", "G", "J", "L", "U", "Y", ":", "{", "}", "|"],
    &["A", "R", "S", "T", "D", "H", "N", "E", "I", "O", "\"", " "],
    &["Z", "X", "C", "V", "B", "K", "M", "<", ">", "?", " ", " "],
];

const DVORAK_LOWERCASE: Grid = &[
    &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "[", "]"],
    &["'", ",", ".", "p", "y", "f", "g", "c", "r", "l", "/", "=", "\\"],
    &["a", "o", "e", "u", "i", "d", "h", "t", "n", "s", "-", " "],
    &[";", "q", "j", "k", "x", "b", "m", "w", "v", "z", " ", " "],
];

const DVORAK_UPPERCASE: Grid = &[
    &["~", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "{", "}"],
    &["\"", "<", ">", "P", "Y", "F", "G", "C", "R", "L", "?", "+", "|"],
    &["A", "O", "E", "U", "I", "D", "H", "T", "N", "S", "_", " "],
    &[":", "Q", "J", "K", "X", "B", "M", "W", "V", "Z", " ", " "],
];

const JCUKEN_LOWERCASE: Grid = &[
    &["ё", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="],
    &["й", "ц", "у", "к", "е", "н", "г", "ш", "щ", "з", "х", "ъ", "\\"],
    &["ф", "ы", "в", "а", "п", "р", "о", "л", "д", "ж", "э", " "],
    &["я", "ч", "с", "м", "и", "т", "ь", "б", "ю", ".", " ", " "],
];

const JCUKEN_UPPERCASE: Grid = &[
    &["Ё", "!", "\"", "№", ";", "%", ":", "?", "*", "(", ")", "_", "+"],
    &["Й", "Ц", "У", "К", "Е", "Н", "Г", "Ш", "Щ", "З", "Х", "Ъ", "/"],
    &["Ф", "Ы", "В", "А", "П", "Р", "О", "Л", "Д", "Ж", "Э", " "],
    &["Я", "Ч", "С", "М", "И", "Т", "Ь", "Б", "Ю", ",", " ", " "],
];

const QWERTZ_LOWERCASE: Grid = &[
    &["^", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "ß", "="],
    &["q", "w", "e", "r", "t", "z", "u", "i", "o", "p", "ü", "+", "\\"],
    &["a", "s", "d", "f", "g", "h", "j", "k", "l", "ö", "ä", "#"],
    &["y", "x", "c", "v", "b", "n", "m", ",", ".", "-", " ", " "],
];

const QWERTZ_UPPERCASE: Grid = &[
    &["°", "!", "\"", "§", "$", "%", "&", "/", "(", ")", "=", "?", "`"],
    &["Q", "W", "E", "R", "T", "Z", "U", "I", "O", "P", "Ü", "*", "|"],
    &["A", "S", "D", "F", "G", "H", "J", "K", "L", "Ö", "Ä", "'"],
    &["Y", "X", "C", "V", "B", "N", "M", ";", ":", "_", " ", " "],
];

const WORKMAN_LOWERCASE: Grid = &[
    &["`", "1", "2", "3", "4", "5", "6", "7", "8", "9", "0", "-", "="],
    &["q", "d", "r", "w", "b", "j", "f", "u", "p", ";", "[", "]", "\\"],
    &["a", "s", "h", "t", "g", "y", "n", "e", "o", "i", "'", " "],
    &["z", "x", "m", "c", "v", "k", "l", ",", ".", "/", " ", " "],
];

const WORKMAN_UPPERCASE: Grid = &[
    &["~", "!", "@", "#", "$", "%", "^", "&", "*", "(", ")", "_", "+"],
    &["Q", "D", "R", "W", "B", "J", "F", "U", "P", ":", "{", "}", "|"],
    &["A", "S", "H", "T", "G", "Y", "N", "E", "O", "I", "\"", " "],
    &["Z", "X", "M", "C", "V", "K", "L", "<", ">", "?", " ", " "],
];
