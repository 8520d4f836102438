//! 핸들 기반 세션 풀
//!
//! 호스트 임베딩은 세션을 정수 핸들로 다룬다. 핸들은 아레나 할당
//! 오프셋이라 0이 아님이 보장되고, 마지막 세션이 사라지면 아레나가
//! 되감겨 핸들 공간도 재사용된다. 활성 자판은 풀 단위로 바꾼다.

use std::collections::HashMap;
use std::mem;

use crate::arena::BumpArena;
use crate::automata::{ImeState, Key3Outcome, KeyOutcome, StateSnapshot};
use crate::layout::schema::{LayoutKind, LayoutSchema};
use crate::layout::{DubeolLayout, SebeolLayout, DUBEOL_STANDARD, SEBEOL_FINAL};

/// 세션 하나가 아레나에서 차지하는 크기
const SESSION_FOOTPRINT: u32 = mem::size_of::<ImeState>() as u32;

/// 조합 세션 풀. 세션 수명은 아레나가, 상태는 맵이 든다.
pub struct SessionPool {
    arena: BumpArena,
    sessions: HashMap<u32, ImeState>,
    dubeol: DubeolLayout,
    sebeol: SebeolLayout,
}

impl Default for SessionPool {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionPool {
    pub fn new() -> Self {
        SessionPool {
            arena: BumpArena::new(),
            sessions: HashMap::new(),
            dubeol: DUBEOL_STANDARD,
            sebeol: SEBEOL_FINAL,
        }
    }

    /// 새 세션을 만들고 핸들을 돌려준다. 아레나가 차면 None.
    pub fn create(&mut self) -> Option<u32> {
        let handle = self.arena.alloc(SESSION_FOOTPRINT)?;
        self.sessions.insert(handle, ImeState::new());
        Some(handle)
    }

    /// 세션을 파괴한다. 모르는 핸들은 무시한다.
    pub fn destroy(&mut self, handle: u32) {
        if self.sessions.remove(&handle).is_some() {
            self.arena.free(handle, SESSION_FOOTPRINT);
        }
    }

    /// 모든 세션을 한꺼번에 파괴한다. 기존 핸들은 전부 무효가 된다.
    pub fn destroy_all(&mut self) {
        self.sessions.clear();
        self.arena.reset();
    }

    /// 세션 상태를 버린다 (확정 없음).
    pub fn reset(&mut self, handle: u32) {
        if let Some(state) = self.sessions.get_mut(&handle) {
            state.reset();
        }
    }

    /// 세션 조합을 확정하고 상태를 비운다. 빈 세션이나 모르는 핸들은 0.
    pub fn commit(&mut self, handle: u32) -> u32 {
        match self.sessions.get_mut(&handle) {
            Some(state) => state.commit(),
            None => 0,
        }
    }

    /// 현재 조합 코드포인트 (없으면 0)
    pub fn current(&self, handle: u32) -> u32 {
        match self.sessions.get(&handle) {
            Some(state) => state.to_codepoint(),
            None => 0,
        }
    }

    /// 두벌식 키(자모 오프셋) 처리. 모르는 핸들이나 음수 오프셋은 NoChange.
    pub fn process_key(&mut self, handle: u32, jamo: i8) -> KeyOutcome {
        let Some(state) = self.sessions.get_mut(&handle) else {
            return KeyOutcome::none();
        };
        if jamo <= 0 {
            return KeyOutcome::none();
        }
        state.process_dubeol(jamo as u8)
    }

    /// 두벌식 생 키(ASCII + 시프트) 처리 — 활성 두벌식 자판으로 매핑한다.
    pub fn process_raw_key(&mut self, handle: u32, key: u8, shift: bool) -> KeyOutcome {
        let Some(jamo) = self.dubeol.map_key(key, shift) else {
            return KeyOutcome::none();
        };
        let Some(state) = self.sessions.get_mut(&handle) else {
            return KeyOutcome::none();
        };
        state.process_dubeol(jamo)
    }

    /// 세벌식 키(ASCII) 처리 — 활성 세벌식 자판으로 분류한다.
    pub fn process_key3(&mut self, handle: u32, key: u8) -> Key3Outcome {
        let Some(state) = self.sessions.get_mut(&handle) else {
            return Key3Outcome::none();
        };
        state.process_sebeol(key, &self.sebeol)
    }

    /// 백스페이스 한 단계. 지운 뒤의 조합 코드포인트, 비면 None.
    pub fn backspace(&mut self, handle: u32) -> Option<u32> {
        self.sessions.get_mut(&handle)?.backspace()
    }

    /// 세션 상태 스냅샷 (모르는 핸들은 None)
    pub fn snapshot(&self, handle: u32) -> Option<StateSnapshot> {
        self.sessions.get(&handle).map(|state| state.snapshot())
    }

    /// JSON5 자판을 파싱해 활성 자판을 교체한다.
    /// 종류(두벌식/세벌식)는 문서가 스스로 밝힌다.
    pub fn load_layout(&mut self, json: &str) -> Result<(), String> {
        let schema = LayoutSchema::parse(json)?;
        match schema.kind {
            LayoutKind::Dubeol => {
                self.dubeol = DubeolLayout::from_json(json)?;
            }
            LayoutKind::Sebeol => {
                self.sebeol = SebeolLayout::from_json(json)?;
            }
        }
        Ok(())
    }

    /// 아레나가 소비한 바이트 수
    pub fn arena_used(&self) -> u32 {
        self.arena.used()
    }

    /// 살아 있는 세션 수
    pub fn active_count(&self) -> u32 {
        self.arena.live_count()
    }
}
