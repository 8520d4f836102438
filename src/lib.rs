pub mod arena;
pub mod automata;
pub mod layout;
pub mod session;
pub mod stream;
pub mod unicode;
pub mod utf8;

use std::sync::Mutex;

use session::SessionPool;

uniffi::setup_scaffolding!();

/// 편집 동작 (UniFFI enum)
#[derive(uniffi::Enum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    NoChange,
    Replace,
    EmitAndNew,
    Literal,
}

impl From<automata::EditAction> for EditAction {
    fn from(action: automata::EditAction) -> Self {
        match action {
            automata::EditAction::NoChange => EditAction::NoChange,
            automata::EditAction::Replace => EditAction::Replace,
            automata::EditAction::EmitAndNew => EditAction::EmitAndNew,
            automata::EditAction::Literal => EditAction::Literal,
        }
    }
}

/// 두벌식 키 처리 결과 (UniFFI → 호스트 전달용)
#[derive(uniffi::Record, Debug, Clone)]
pub struct KeyResult {
    /// 호스트가 수행할 편집 동작
    pub action: EditAction,
    /// 확정된 이전 조합 (없으면 0)
    pub prev: u32,
    /// 현재 조합 중인 코드포인트 (없으면 0)
    pub current: u32,
}

impl From<automata::KeyOutcome> for KeyResult {
    fn from(outcome: automata::KeyOutcome) -> Self {
        KeyResult {
            action: outcome.action.into(),
            prev: outcome.prev,
            current: outcome.current,
        }
    }
}

/// 세벌식 키 처리 결과 — 리터럴 문자가 추가된다
#[derive(uniffi::Record, Debug, Clone)]
pub struct Key3Result {
    pub action: EditAction,
    pub prev: u32,
    pub current: u32,
    /// 그대로 삽입할 문자 (Literal일 때만 0이 아님)
    pub literal: u32,
}

impl From<automata::Key3Outcome> for Key3Result {
    fn from(outcome: automata::Key3Outcome) -> Self {
        Key3Result {
            action: outcome.action.into(),
            prev: outcome.prev,
            current: outcome.current,
            literal: outcome.literal,
        }
    }
}

/// 조합 상태 스냅샷 (자리마다 오프셋 + 겹자모 플래그)
#[derive(uniffi::Record, Debug, Clone)]
pub struct ImeSnapshot {
    pub choseong: u8,
    pub choseong_double: bool,
    pub jungseong: u8,
    pub jungseong_double: bool,
    pub jongseong: u8,
    pub jongseong_double: bool,
}

impl From<automata::StateSnapshot> for ImeSnapshot {
    fn from(snap: automata::StateSnapshot) -> Self {
        ImeSnapshot {
            choseong: snap.choseong,
            choseong_double: snap.choseong_double,
            jungseong: snap.jungseong,
            jungseong_double: snap.jungseong_double,
            jongseong: snap.jongseong,
            jongseong_double: snap.jongseong_double,
        }
    }
}

/// 음절 분해 결과 (종성 없으면 jongseong = 0)
#[derive(uniffi::Record, Debug, Clone)]
pub struct Decomposed {
    pub choseong: u32,
    pub jungseong: u32,
    pub jongseong: u32,
}

/// 한글 입력 엔진 (UniFFI object, thread-safe)
///
/// 세션은 정수 핸들로 다룬다 — 텍스트 필드 하나가 세션 하나다.
/// 핸들 0은 생성 실패를 뜻한다.
#[derive(uniffi::Object)]
pub struct HangulIme {
    pool: Mutex<SessionPool>,
}

impl Default for HangulIme {
    fn default() -> Self {
        Self::new()
    }
}

#[uniffi::export]
impl HangulIme {
    /// 새 엔진을 생성한다. (두벌식 표준 + 세벌식 최종 자판)
    #[uniffi::constructor]
    pub fn new() -> Self {
        HangulIme { pool: Mutex::new(SessionPool::new()) }
    }

    /// 새 세션을 만든다. 실패하면 0.
    pub fn create_session(&self) -> u32 {
        let mut pool = self.pool.lock().unwrap();
        pool.create().unwrap_or(0)
    }

    /// 세션을 파괴한다.
    pub fn destroy_session(&self, handle: u32) {
        let mut pool = self.pool.lock().unwrap();
        pool.destroy(handle);
    }

    /// 모든 세션을 파괴한다. 기존 핸들은 전부 무효가 된다.
    pub fn destroy_all_sessions(&self) {
        let mut pool = self.pool.lock().unwrap();
        pool.destroy_all();
    }

    /// 세션 조합을 버린다 (확정 없음).
    pub fn reset(&self, handle: u32) {
        let mut pool = self.pool.lock().unwrap();
        pool.reset(handle);
    }

    /// 세션 조합을 확정하고 비운다. 포커스 이탈용. 빈 세션은 0.
    pub fn commit(&self, handle: u32) -> u32 {
        let mut pool = self.pool.lock().unwrap();
        pool.commit(handle)
    }

    /// 현재 조합 코드포인트 (없으면 0)
    pub fn current(&self, handle: u32) -> u32 {
        let pool = self.pool.lock().unwrap();
        pool.current(handle)
    }

    /// 두벌식 키를 자모 오프셋으로 처리한다.
    pub fn process_key(&self, handle: u32, jamo: i8) -> KeyResult {
        let mut pool = self.pool.lock().unwrap();
        pool.process_key(handle, jamo).into()
    }

    /// 두벌식 생 키(ASCII + 시프트)를 활성 자판으로 매핑해 처리한다.
    pub fn process_raw_key(&self, handle: u32, key: u8, shift: bool) -> KeyResult {
        let mut pool = self.pool.lock().unwrap();
        pool.process_raw_key(handle, key, shift).into()
    }

    /// 세벌식 키(ASCII)를 처리한다.
    pub fn process_key3(&self, handle: u32, key: u8) -> Key3Result {
        let mut pool = self.pool.lock().unwrap();
        pool.process_key3(handle, key).into()
    }

    /// 백스페이스 한 단계. 지운 뒤의 조합 코드포인트, 비면 0.
    pub fn backspace(&self, handle: u32) -> u32 {
        let mut pool = self.pool.lock().unwrap();
        pool.backspace(handle).unwrap_or(0)
    }

    /// 세션 상태 스냅샷 (모르는 핸들은 None)
    pub fn snapshot(&self, handle: u32) -> Option<ImeSnapshot> {
        let pool = self.pool.lock().unwrap();
        pool.snapshot(handle).map(Into::into)
    }

    /// JSON5 문자열로 자판을 로드한다.
    pub fn load_layout(&self, json: String) -> Result<(), String> {
        let mut pool = self.pool.lock().unwrap();
        pool.load_layout(&json)
    }

    /// 아레나가 소비한 바이트 수
    pub fn arena_used(&self) -> u32 {
        let pool = self.pool.lock().unwrap();
        pool.arena_used()
    }

    /// 살아 있는 세션 수
    pub fn active_sessions(&self) -> u32 {
        let pool = self.pool.lock().unwrap();
        pool.active_count()
    }
}

// ── 코덱 표면 (상태 없는 자유 함수) ──

/// 한글 완성형 음절인지 (가~힣)
#[uniffi::export]
pub fn is_hangul_syllable(cp: u32) -> bool {
    unicode::is_syllable(cp)
}

/// 음절에 종성이 있는지
#[uniffi::export]
pub fn has_final(cp: u32) -> bool {
    unicode::has_final(cp)
}

/// 음절의 초성 호환 자모 (음절이 아니면 0)
#[uniffi::export]
pub fn get_initial(cp: u32) -> u32 {
    unicode::get_initial(cp).unwrap_or(0)
}

/// 음절의 중성 호환 자모 (음절이 아니면 0)
#[uniffi::export]
pub fn get_medial(cp: u32) -> u32 {
    unicode::get_medial(cp).unwrap_or(0)
}

/// 음절의 종성 호환 자모 (없으면 0)
#[uniffi::export]
pub fn get_final(cp: u32) -> u32 {
    unicode::get_final(cp).unwrap_or(0)
}

/// 호환 자모 세 개로 음절을 합성한다. 종성 0은 "종성 없음". 실패는 0.
#[uniffi::export]
pub fn compose(choseong: u32, jungseong: u32, jongseong: u32) -> u32 {
    unicode::compose(choseong, jungseong, jongseong).unwrap_or(0)
}

/// 음절을 호환 자모로 분해한다. 음절이 아니면 None.
#[uniffi::export]
pub fn decompose(cp: u32) -> Option<Decomposed> {
    unicode::decompose(cp).map(|(choseong, jungseong, jongseong)| Decomposed {
        choseong,
        jungseong,
        jongseong,
    })
}

/// 호환 자모인지 (U+3131~U+3163)
#[uniffi::export]
pub fn is_jamo(cp: u32) -> bool {
    unicode::is_jamo(cp)
}

/// 호환 자모 자음인지
#[uniffi::export]
pub fn is_consonant(cp: u32) -> bool {
    unicode::is_consonant(cp)
}

/// 호환 자모 모음인지
#[uniffi::export]
pub fn is_vowel(cp: u32) -> bool {
    unicode::is_vowel(cp)
}

/// 쌍자음인지 (ㄲ ㄸ ㅃ ㅆ ㅉ)
#[uniffi::export]
pub fn is_double_consonant(cp: u32) -> bool {
    unicode::is_double_consonant(cp)
}

/// 겹모음인지 (ㅘ ㅙ ㅚ ㅝ ㅞ ㅟ ㅢ)
#[uniffi::export]
pub fn is_double_vowel(cp: u32) -> bool {
    unicode::is_double_vowel(cp)
}

/// UTF-8 바이트열을 자모/코드포인트 열로 분해한다.
/// 잘못된 바이트를 만나면 거기서 멈춘다.
#[uniffi::export]
pub fn decompose_text(bytes: Vec<u8>) -> Vec<u32> {
    stream::decompose_string(&bytes)
}

/// 자모 코드포인트 열을 음절 열로 조합한다 (한 토큰 미리보기 휴리스틱).
#[uniffi::export]
pub fn compose_text(cps: Vec<u32>) -> Vec<u32> {
    stream::compose_string(&cps)
}
