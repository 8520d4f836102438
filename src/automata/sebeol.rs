//! 세벌식 오토마타
//!
//! 초/중/종성이 키에 역할별로 붙어 있어 모호성이 없고, 따라서 음절
//! 분리도 없다. 자리가 이미 차 있으면 겹자모를 시도하고, 안 되면
//! 확정 후 새 음절이다. 리터럴 키는 조합을 확정하고 문자를 그대로
//! 내보낸다.

use crate::layout::{SebeolKey, SebeolLayout};

use super::{
    combine_choseong, combine_jongseong, combine_jungseong, ImeState,
    Key3Outcome, Slot,
};

impl ImeState {
    /// 세벌식 키(ASCII) 하나를 처리한다. 자판에 없는 키는 NoChange.
    pub fn process_sebeol(
        &mut self,
        key: u8,
        layout: &SebeolLayout,
    ) -> Key3Outcome {
        match layout.map_key(key) {
            Some(SebeolKey::Choseong(offset)) => self.sebeol_choseong(offset),
            Some(SebeolKey::Jungseong(offset)) => self.sebeol_jungseong(offset),
            Some(SebeolKey::Jongseong(offset)) => self.sebeol_jongseong(offset),
            Some(SebeolKey::Symbol(cp)) => self.sebeol_symbol(cp),
            None => Key3Outcome::none(),
        }
    }

    /// 초성 키: 외딴 초성이면 쌍자음을 시도하고, 아니면 확정 후 새 초성.
    fn sebeol_choseong(&mut self, jamo: u8) -> Key3Outcome {
        if self.jung.is_empty()
            && !self.cho_double
            && let Some(current) = self.cho.get()
            && let Some(combined) = combine_choseong(current, jamo)
        {
            self.cho = Slot::Live(combined);
            self.cho_double = true;
            return Key3Outcome::replace(self.to_codepoint());
        }

        if !self.is_empty() {
            let prev = self.to_codepoint();
            self.reset();
            self.cho = Slot::Live(jamo);
            return Key3Outcome::emit(prev, self.to_codepoint());
        }
        self.cho = Slot::Live(jamo);
        Key3Outcome::replace(self.to_codepoint())
    }

    /// 중성 키: 겹모음 시도 → 실패 시 차단 → 새 음절 시작 또는 채우기.
    /// 겹모음이 완성된 열린 음절에 모음이 또 오면 중성을 제자리에서
    /// 갈아끼운다.
    fn sebeol_jungseong(&mut self, jamo: u8) -> Key3Outcome {
        let mut pending_prev = None;
        if !self.jong.is_live()
            && !self.jung_double
            && let Some(current) = self.jung.get()
        {
            if let Some(combined) = combine_jungseong(current, jamo) {
                self.jung = Slot::Live(combined);
                self.jung_double = true;
                return Key3Outcome::replace(self.to_codepoint());
            }
            pending_prev = Some(self.to_codepoint());
            self.jung = Slot::Blocked;
        }

        let start_new = matches!(self.jung, Slot::Blocked)
            || ((!self.cho.is_live() || self.jung.is_live())
                && (!self.jung_double || self.jong.is_live()));
        if start_new {
            let prev = match pending_prev {
                Some(p) => Some(p),
                None if !self.is_empty() => Some(self.to_codepoint()),
                None => None,
            };
            self.reset();
            self.jung = Slot::Live(jamo);
            return match prev {
                Some(p) => Key3Outcome::emit(p, self.to_codepoint()),
                None => Key3Outcome::replace(self.to_codepoint()),
            };
        }

        self.jung = Slot::Live(jamo);
        self.jung_double = false;
        Key3Outcome::replace(self.to_codepoint())
    }

    /// 종성 키: 겹받침 시도 → 실패 시 차단 → 열린 음절이면 채우고,
    /// 아니면 확정 후 외딴 종성으로 남긴다 (다음 키에서 풀린다).
    fn sebeol_jongseong(&mut self, jamo: u8) -> Key3Outcome {
        let mut pending_prev = None;
        if !self.jong_double
            && let Some(current) = self.jong.get()
        {
            if let Some(combined) = combine_jongseong(current, jamo) {
                self.jong = Slot::Live(combined);
                self.jong_double = true;
                return Key3Outcome::replace(self.to_codepoint());
            }
            pending_prev = Some(self.to_codepoint());
            self.jong = Slot::Blocked;
        }

        if self.cho.is_live() && self.jung.is_live() && self.jong.is_empty() {
            self.jong = Slot::Live(jamo);
            self.jong_double = false;
            return Key3Outcome::replace(self.to_codepoint());
        }

        let prev = match pending_prev {
            Some(p) => Some(p),
            None if !self.is_empty() => Some(self.to_codepoint()),
            None => None,
        };
        self.reset();
        self.jong = Slot::Live(jamo);
        match prev {
            Some(p) => Key3Outcome::emit(p, self.to_codepoint()),
            None => Key3Outcome::replace(self.to_codepoint()),
        }
    }

    /// 리터럴 키: 조합이 있으면 확정하고, 문자를 그대로 삽입하게 한다.
    fn sebeol_symbol(&mut self, cp: u32) -> Key3Outcome {
        let prev = if self.is_empty() {
            0
        } else {
            let p = self.to_codepoint();
            self.reset();
            p
        };
        Key3Outcome::literal(prev, cp)
    }
}
