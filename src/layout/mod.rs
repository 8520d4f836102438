//! 자판 배열: 두벌식/세벌식 고정 테이블과 자모 오프셋 변환
//!
//! 슬롯 값은 "호환 자모 오프셋"(코드포인트 − U+3130)을 쓴다.
//! 자음 오프셋은 1~30(ㄱ~ㅎ, 겹자모 포함), 모음 오프셋은 31~51(ㅏ~ㅣ).
//! 자판 테이블과 오프셋 변환은 전부 const 데이터다.

pub mod schema;

use crate::unicode;

/// 자음 오프셋 최소값 (ㄱ)
pub const CONSONANT_MIN: u8 = 1;
/// 자음 오프셋 최대값 (ㅎ)
pub const CONSONANT_MAX: u8 = 30;
/// 모음 오프셋 최소값 (ㅏ)
pub const VOWEL_MIN: u8 = 31;
/// 모음 오프셋 최대값 (ㅣ)
pub const VOWEL_MAX: u8 = 51;

/// 오프셋 변환 테이블의 "해당 없음" 표시값
const NO_INDEX: u8 = 0xFF;

/// 자모 오프셋을 단독 호환 자모 코드포인트로 바꾼다.
pub fn offset_to_compat(offset: u8) -> u32 {
    unicode::COMPAT_BASE + offset as u32
}

// ── 오프셋 ↔ 코덱 인덱스 변환 ──
//
// 오프셋 공간은 호환 자모 배열을 따르므로 초성/종성 인덱스와는
// 불연속이다. 핫 패스마다 불리는 변환이라 테이블로 고정한다.

/// 자음 오프셋(1~30) → 초성 인덱스(0~18). 겹받침 전용 자모는 초성 불가.
static OFFSET_TO_CHOSEONG: [u8; 31] = [
    NO_INDEX, // 0
    0,        // 1: ㄱ
    1,        // 2: ㄲ
    NO_INDEX, // 3: ㄳ
    2,        // 4: ㄴ
    NO_INDEX, // 5: ㄵ
    NO_INDEX, // 6: ㄶ
    3,        // 7: ㄷ
    4,        // 8: ㄸ
    5,        // 9: ㄹ
    NO_INDEX, // 10: ㄺ
    NO_INDEX, // 11: ㄻ
    NO_INDEX, // 12: ㄼ
    NO_INDEX, // 13: ㄽ
    NO_INDEX, // 14: ㄾ
    NO_INDEX, // 15: ㄿ
    NO_INDEX, // 16: ㅀ
    6,        // 17: ㅁ
    7,        // 18: ㅂ
    8,        // 19: ㅃ
    NO_INDEX, // 20: ㅄ
    9,        // 21: ㅅ
    10,       // 22: ㅆ
    11,       // 23: ㅇ
    12,       // 24: ㅈ
    13,       // 25: ㅉ
    14,       // 26: ㅊ
    15,       // 27: ㅋ
    16,       // 28: ㅌ
    17,       // 29: ㅍ
    18,       // 30: ㅎ
];

/// 자음 오프셋(1~30) → 종성 인덱스(1~27). ㄸ ㅃ ㅉ는 종성 불가.
static OFFSET_TO_JONGSEONG: [u8; 31] = [
    0,        // 0: 종성 없음
    1,        // 1: ㄱ
    2,        // 2: ㄲ
    3,        // 3: ㄳ
    4,        // 4: ㄴ
    5,        // 5: ㄵ
    6,        // 6: ㄶ
    7,        // 7: ㄷ
    NO_INDEX, // 8: ㄸ
    8,        // 9: ㄹ
    9,        // 10: ㄺ
    10,       // 11: ㄻ
    11,       // 12: ㄼ
    12,       // 13: ㄽ
    13,       // 14: ㄾ
    14,       // 15: ㄿ
    15,       // 16: ㅀ
    16,       // 17: ㅁ
    17,       // 18: ㅂ
    NO_INDEX, // 19: ㅃ
    18,       // 20: ㅄ
    19,       // 21: ㅅ
    20,       // 22: ㅆ
    21,       // 23: ㅇ
    22,       // 24: ㅈ
    NO_INDEX, // 25: ㅉ
    23,       // 26: ㅊ
    24,       // 27: ㅋ
    25,       // 28: ㅌ
    26,       // 29: ㅍ
    27,       // 30: ㅎ
];

/// 초성 인덱스(0~18) → 자음 오프셋
static CHOSEONG_TO_OFFSET: [u8; 19] = [
    1, 2, 4, 7, 8, 9, 17, 18, 19, 21, 22, 23, 24, 25, 26, 27, 28, 29, 30,
];

/// 종성 인덱스(0~27) → 자음 오프셋
static JONGSEONG_TO_OFFSET: [u8; 28] = [
    0, 1, 2, 3, 4, 5, 6, 7, 9, 10, 11, 12, 13, 14, 15, 16, 17, 18, 20, 21,
    22, 23, 24, 26, 27, 28, 29, 30,
];

/// 자음 오프셋 → 초성 인덱스
pub fn offset_to_choseong(offset: u8) -> Option<u32> {
    match OFFSET_TO_CHOSEONG.get(offset as usize) {
        Some(&NO_INDEX) | None => None,
        Some(&idx) => Some(idx as u32),
    }
}

/// 모음 오프셋 → 중성 인덱스 (연속 구간이라 뺄셈 한 번)
pub fn offset_to_jungseong(offset: u8) -> Option<u32> {
    if (VOWEL_MIN..=VOWEL_MAX).contains(&offset) {
        Some((offset - VOWEL_MIN) as u32)
    } else {
        None
    }
}

/// 자음 오프셋 → 종성 인덱스 (0 = 종성 없음, ㄸ ㅃ ㅉ는 None)
pub fn offset_to_jongseong(offset: u8) -> Option<u32> {
    match OFFSET_TO_JONGSEONG.get(offset as usize) {
        Some(&NO_INDEX) | None => None,
        Some(&idx) => Some(idx as u32),
    }
}

/// 초성 인덱스 → 자음 오프셋
pub fn choseong_to_offset(l: u32) -> Option<u8> {
    CHOSEONG_TO_OFFSET.get(l as usize).copied()
}

/// 중성 인덱스 → 모음 오프셋
pub fn jungseong_to_offset(v: u32) -> Option<u8> {
    if v < unicode::V_COUNT {
        Some(VOWEL_MIN + v as u8)
    } else {
        None
    }
}

/// 종성 인덱스(1~27) → 자음 오프셋
pub fn jongseong_to_offset(t: u32) -> Option<u8> {
    if t == 0 {
        return None;
    }
    JONGSEONG_TO_OFFSET.get(t as usize).copied()
}

// ── 두벌식 자판 ──

/// 두벌식 자판: a~z 두 줄(기본/시프트)이 자모 오프셋으로 매핑된다.
/// 0은 매핑 없음.
#[derive(Debug, Clone)]
pub struct DubeolLayout {
    pub(crate) base: [u8; 26],
    pub(crate) shift: [u8; 26],
}

/// 두벌식 표준 자판
pub const DUBEOL_STANDARD: DubeolLayout = DubeolLayout {
    base: [
        17, // a: ㅁ
        48, // b: ㅠ
        26, // c: ㅊ
        23, // d: ㅇ
        7,  // e: ㄷ
        9,  // f: ㄹ
        30, // g: ㅎ
        39, // h: ㅗ
        33, // i: ㅑ
        35, // j: ㅓ
        31, // k: ㅏ
        51, // l: ㅣ
        49, // m: ㅡ
        44, // n: ㅜ
        32, // o: ㅐ
        36, // p: ㅔ
        18, // q: ㅂ
        1,  // r: ㄱ
        4,  // s: ㄴ
        21, // t: ㅅ
        37, // u: ㅕ
        29, // v: ㅍ
        24, // w: ㅈ
        28, // x: ㅌ
        43, // y: ㅛ
        27, // z: ㅋ
    ],
    shift: [
        17, // A: ㅁ
        48, // B: ㅠ
        26, // C: ㅊ
        23, // D: ㅇ
        8,  // E: ㄸ
        9,  // F: ㄹ
        30, // G: ㅎ
        39, // H: ㅗ
        33, // I: ㅑ
        35, // J: ㅓ
        31, // K: ㅏ
        51, // L: ㅣ
        49, // M: ㅡ
        44, // N: ㅜ
        34, // O: ㅒ
        38, // P: ㅖ
        19, // Q: ㅃ
        2,  // R: ㄲ
        4,  // S: ㄴ
        22, // T: ㅆ
        37, // U: ㅕ
        29, // V: ㅍ
        25, // W: ㅉ
        28, // X: ㅌ
        43, // Y: ㅛ
        27, // Z: ㅋ
    ],
};

impl DubeolLayout {
    /// a~z 키(ASCII)와 시프트 여부를 자모 오프셋으로 바꾼다.
    /// 글자 키가 아니면 None.
    pub fn map_key(&self, key: u8, shift: bool) -> Option<u8> {
        let idx = match key {
            b'a'..=b'z' => (key - b'a') as usize,
            b'A'..=b'Z' => (key - b'A') as usize,
            _ => return None,
        };
        let row = if shift { &self.shift } else { &self.base };
        match row[idx] {
            0 => None,
            offset => Some(offset),
        }
    }
}

// ── 세벌식 자판 ──

/// 세벌식 키 토큰: 초성/중성/종성은 역할이 키에 붙어 있고,
/// 그 외 키는 리터럴 문자를 그대로 낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SebeolKey {
    Choseong(u8),
    Jungseong(u8),
    Jongseong(u8),
    Symbol(u32),
}

/// 세벌식 테이블 엔트리 인코딩:
/// 93~122 → 초성(값 − 92), 66~86 → 중성(값 − 35), 1~30 → 종성(값),
/// 그 외 → 리터럴 코드포인트. 0은 매핑 없음.
const fn cho(offset: u32) -> u32 {
    offset + 92
}
const fn jung(offset: u32) -> u32 {
    offset + 35
}
const fn jong(offset: u32) -> u32 {
    offset
}
const fn lit(c: char) -> u32 {
    c as u32
}

/// 세벌식 자판: ASCII 33~126 전체를 덮는 94칸 테이블.
#[derive(Debug, Clone)]
pub struct SebeolLayout {
    pub(crate) entries: [u32; 94],
}

/// 세벌식 최종 자판
pub const SEBEOL_FINAL: SebeolLayout = SebeolLayout {
    entries: [
        jong(2),   // '!': 받침 ㄲ
        lit('·'),  // '"'
        jong(24),  // '#': 받침 ㅈ
        jong(15),  // '$': 받침 ㄿ
        jong(14),  // '%': 받침 ㄾ
        lit('“'),  // '&'
        cho(28),   // '\'': ㅌ
        lit('\''), // '('
        lit(')'),  // ')'
        lit('”'),  // '*'
        lit('+'),  // '+'
        lit(','),  // ','
        lit(')'),  // '-'
        lit('.'),  // '.'
        lit('/'),  // '/'
        cho(27),   // '0': ㅋ
        jong(30),  // '1': 받침 ㅎ
        jong(22),  // '2': 받침 ㅆ
        jong(18),  // '3': 받침 ㅂ
        jung(43),  // '4': ㅛ
        jung(48),  // '5': ㅠ
        jung(33),  // '6': ㅑ
        jung(38),  // '7': ㅖ
        jung(50),  // '8': ㅢ
        jung(44),  // '9': ㅜ
        lit('4'),  // ':'
        cho(18),   // ';': ㅂ
        lit(','),  // '<'
        lit('>'),  // '='
        lit('.'),  // '>'
        lit('!'),  // '?'
        jong(10),  // '@': 받침 ㄺ
        jong(7),   // 'A': 받침 ㄷ
        lit('?'),  // 'B'
        jong(27),  // 'C': 받침 ㅋ
        jong(12),  // 'D': 받침 ㄼ
        jong(5),   // 'E': 받침 ㄵ
        jong(11),  // 'F': 받침 ㄻ
        jung(34),  // 'G': ㅒ
        lit('0'),  // 'H'
        lit('7'),  // 'I'
        lit('1'),  // 'J'
        lit('2'),  // 'K'
        lit('3'),  // 'L'
        lit('"'),  // 'M'
        lit('-'),  // 'N'
        lit('8'),  // 'O'
        lit('9'),  // 'P'
        jong(29),  // 'Q': 받침 ㅍ
        jong(16),  // 'R': 받침 ㅀ
        jong(6),   // 'S': 받침 ㄶ
        jong(13),  // 'T': 받침 ㄽ
        lit('6'),  // 'U'
        jong(3),   // 'V': 받침 ㄳ
        jong(28),  // 'W': 받침 ㅌ
        jong(20),  // 'X': 받침 ㅄ
        lit('5'),  // 'Y'
        jong(26),  // 'Z': 받침 ㅊ
        lit('('),  // '['
        lit(':'),  // '\\'
        lit('<'),  // ']'
        lit('='),  // '^'
        lit('-'),  // '_'
        lit('*'),  // '`'
        jong(23),  // 'a': 받침 ㅇ
        jung(44),  // 'b': ㅜ
        jung(36),  // 'c': ㅔ
        jung(51),  // 'd': ㅣ
        jung(37),  // 'e': ㅕ
        jung(31),  // 'f': ㅏ
        jung(49),  // 'g': ㅡ
        cho(4),    // 'h': ㄴ
        cho(17),   // 'i': ㅁ
        cho(23),   // 'j': ㅇ
        cho(1),    // 'k': ㄱ
        cho(24),   // 'l': ㅈ
        cho(30),   // 'm': ㅎ
        cho(21),   // 'n': ㅅ
        cho(26),   // 'o': ㅊ
        cho(29),   // 'p': ㅍ
        jong(21),  // 'q': 받침 ㅅ
        jung(32),  // 'r': ㅐ
        jong(4),   // 's': 받침 ㄴ
        jung(35),  // 't': ㅓ
        cho(7),    // 'u': ㄷ
        jung(39),  // 'v': ㅗ
        jong(9),   // 'w': 받침 ㄹ
        jong(1),   // 'x': 받침 ㄱ
        cho(9),    // 'y': ㄹ
        jong(17),  // 'z': 받침 ㅁ
        lit('%'),  // '{'
        lit('|'),  // '|'
        lit('/'),  // '}'
        lit('※'), // '~'
    ],
};

impl SebeolLayout {
    /// ASCII 키를 세벌식 토큰으로 분류한다. 33~126 밖이거나
    /// 매핑이 없으면 None.
    pub fn map_key(&self, key: u8) -> Option<SebeolKey> {
        if !(33..=126).contains(&key) {
            return None;
        }
        let value = self.entries[(key - 33) as usize];
        match value {
            0 => None,
            93..=122 => Some(SebeolKey::Choseong((value - 92) as u8)),
            66..=86 => Some(SebeolKey::Jungseong((value - 35) as u8)),
            1..=30 => Some(SebeolKey::Jongseong(value as u8)),
            _ => Some(SebeolKey::Symbol(value)),
        }
    }
}
