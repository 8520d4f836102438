//! 두벌식 오토마타
//!
//! 자음/모음 두 집합만 있는 자판이라 종성과 다음 초성이 모호하다.
//! 핵심: 겹받침 형성, 모음 입력 시 음절 분리(종성 이동), 겹받침 분리.
//!
//! 키는 자모 오프셋(자음 1~30, 모음 31~51)으로 들어온다. 자판 매핑은
//! `layout::DubeolLayout`이 맡고, 여기서는 조합 규칙만 다룬다.

use crate::layout;

use super::{
    cannot_be_jongseong, combine_choseong, combine_jongseong,
    combine_jungseong, split_jongseong, ImeState, KeyOutcome, Slot,
};

impl ImeState {
    /// 두벌식 키 하나를 처리한다. 범위 밖 오프셋은 NoChange.
    pub fn process_dubeol(&mut self, jamo: u8) -> KeyOutcome {
        match jamo {
            layout::CONSONANT_MIN..=layout::CONSONANT_MAX => {
                self.dubeol_consonant(jamo)
            }
            layout::VOWEL_MIN..=layout::VOWEL_MAX => self.dubeol_vowel(jamo),
            _ => KeyOutcome::none(),
        }
    }

    /// 자음 입력.
    ///
    /// 1. 닫힌 음절이면 겹받침을 시도한다. 실패하거나 이미 겹받침이면
    ///    음절을 확정해야 한다.
    /// 2. 새 음절 시작: 중성이 없거나, 1에서 확정이 필요했거나, 열린
    ///    음절에 종성 불가 자음(ㄸㅃㅉ)이 온 경우. 초성만 있는 상태면
    ///    먼저 쌍자음을 시도한다.
    /// 3. 그 외에는 현재 음절을 채운다: 빈 초성 또는 빈 종성.
    fn dubeol_consonant(&mut self, jamo: u8) -> KeyOutcome {
        let mut must_emit = false;
        if self.jung.is_live()
            && let Some(current) = self.jong.get()
        {
            if !self.jong_double
                && let Some(combined) = combine_jongseong(current, jamo)
            {
                self.jong = Slot::Live(combined);
                self.jong_double = true;
                return KeyOutcome::replace(self.to_codepoint());
            }
            must_emit = true;
        }

        let start_new = !self.jung.is_live()
            || must_emit
            || (self.cho.is_live()
                && self.jong.is_empty()
                && cannot_be_jongseong(jamo));
        if start_new {
            // 초성만 있는 상태에서는 쌍자음 조합이 먼저다
            if self.jung.is_empty()
                && self.jong.is_empty()
                && let Some(current) = self.cho.get()
                && let Some(combined) = combine_choseong(current, jamo)
            {
                self.cho = Slot::Live(combined);
                self.cho_double = true;
                return KeyOutcome::replace(self.to_codepoint());
            }
            if self.is_empty() {
                self.cho = Slot::Live(jamo);
                self.cho_double = true;
                return KeyOutcome::replace(self.to_codepoint());
            }
            let prev = self.to_codepoint();
            self.reset();
            self.cho = Slot::Live(jamo);
            self.cho_double = true;
            return KeyOutcome::emit(prev, self.to_codepoint());
        }

        // 현재 음절 채우기
        if !self.cho.is_live() {
            // 모음 먼저 친 경우의 모아주기: 빈 초성을 채운다
            self.cho = Slot::Live(jamo);
            self.cho_double = true;
        } else if self.jong.is_empty() {
            self.jong = Slot::Live(jamo);
            self.jong_double = false;
        }
        KeyOutcome::replace(self.to_codepoint())
    }

    /// 모음 입력.
    ///
    /// 1. 열린 음절의 중성과 겹모음을 시도한다. 실패하면 그 자리는
    ///    차단되고, 확정할 조합은 차단 전에 캡처한다.
    /// 2. 닫힌 음절이면 음절 분리: 겹받침은 갈라서 첫째를 남기고 둘째를
    ///    새 초성으로, 홑받침은 통째로 새 초성으로 보낸다.
    /// 3. 그 외에는 새 음절을 시작하거나(초성 없음 / 중성 점유·차단),
    ///    초성만 있는 음절의 중성을 채운다.
    fn dubeol_vowel(&mut self, jamo: u8) -> KeyOutcome {
        let mut pending_prev = None;
        if self.jong.is_empty()
            && !self.jung_double
            && let Some(current) = self.jung.get()
        {
            if let Some(combined) = combine_jungseong(current, jamo) {
                self.jung = Slot::Live(combined);
                self.jung_double = true;
                return KeyOutcome::replace(self.to_codepoint());
            }
            pending_prev = Some(self.to_codepoint());
            self.jung = Slot::Blocked;
        }

        // 음절 분리 — 종성이 다음 음절 초성으로 넘어간다
        if self.cho.is_live()
            && self.jung.is_live()
            && let Some(jong) = self.jong.get()
        {
            let next_cho;
            if self.jong_double
                && let Some((first, second)) = split_jongseong(jong)
            {
                self.jong = Slot::Live(first);
                next_cho = second;
            } else {
                self.jong = Slot::Empty;
                next_cho = jong;
            }
            let prev = self.to_codepoint();
            self.reset();
            self.cho = Slot::Live(next_cho);
            self.jung = Slot::Live(jamo);
            return KeyOutcome::emit(prev, self.to_codepoint());
        }

        let start_new = !self.cho.is_live() || !self.jung.is_empty();
        if start_new {
            let prev = match pending_prev {
                Some(p) => Some(p),
                None if !self.is_empty() => Some(self.to_codepoint()),
                None => None,
            };
            self.reset();
            self.jung = Slot::Live(jamo);
            return match prev {
                Some(p) => KeyOutcome::emit(p, self.to_codepoint()),
                None => KeyOutcome::replace(self.to_codepoint()),
            };
        }

        // 초성만 있는 음절의 중성을 채운다
        self.jung = Slot::Live(jamo);
        self.jung_double = false;
        KeyOutcome::replace(self.to_codepoint())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::automata::EditAction;

    /// 오프셋 열을 처리하고 마지막 결과를 돌려준다
    fn process_all(state: &mut ImeState, jamos: &[u8]) -> KeyOutcome {
        let mut last = KeyOutcome::none();
        for &jamo in jamos {
            last = state.process_dubeol(jamo);
        }
        last
    }

    #[test]
    fn test_compose_han() {
        // ㅎ ㅏ ㄴ → 한 (세 번 모두 Replace)
        let mut state = ImeState::new();

        let r = state.process_dubeol(30); // ㅎ
        assert_eq!(r, KeyOutcome::replace(0x314E));

        let r = state.process_dubeol(31); // ㅏ
        assert_eq!(r, KeyOutcome::replace('하' as u32));

        let r = state.process_dubeol(4); // ㄴ
        assert_eq!(r, KeyOutcome::replace('한' as u32));
    }

    #[test]
    fn test_double_choseong() {
        // ㄱ ㄱ → ㄲ
        let mut state = ImeState::new();
        state.process_dubeol(1);
        let r = state.process_dubeol(1);
        assert_eq!(r, KeyOutcome::replace(0x3132)); // ㄲ
    }

    #[test]
    fn test_double_choseong_then_third() {
        // ㄲ에 ㄱ가 또 오면 확정하고 새 초성
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 1]);
        let r = state.process_dubeol(1);
        assert_eq!(r, KeyOutcome::emit(0x3132, 0x3131));
    }

    #[test]
    fn test_double_vowel_gwa() {
        // ㄱ ㅗ ㅏ → 과
        let mut state = ImeState::new();
        let r = process_all(&mut state, &[1, 39, 31]);
        assert_eq!(r, KeyOutcome::replace('과' as u32));
    }

    #[test]
    fn test_double_vowel_then_vowel_emits() {
        // 과 상태에서 모음이 또 오면 확정 + 새 모음
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 39, 31]);
        let r = state.process_dubeol(31); // ㅏ
        assert_eq!(r, KeyOutcome::emit('과' as u32, 0x314F));
    }

    #[test]
    fn test_vowel_combine_failure_emits_full_syllable() {
        // 가 + ㅗ: ㅏㅗ는 겹모음이 아님 → "가"를 확정하고 ㅗ로 새 조합
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 31]);
        let r = state.process_dubeol(39); // ㅗ
        assert_eq!(r, KeyOutcome::emit('가' as u32, 0x3157));
    }

    #[test]
    fn test_syllable_split_on_vowel() {
        // 한 + ㅏ → "하" 확정, ㄴ+ㅏ = "나"
        let mut state = ImeState::new();
        process_all(&mut state, &[30, 31, 4]);
        let r = state.process_dubeol(31);
        assert_eq!(r, KeyOutcome::emit('하' as u32, '나' as u32));
    }

    #[test]
    fn test_double_jongseong_formation() {
        // ㄷ ㅏ ㄹ ㄱ → 닭 (ㄹ+ㄱ = ㄺ)
        let mut state = ImeState::new();
        let r = process_all(&mut state, &[7, 31, 9, 1]);
        assert_eq!(r, KeyOutcome::replace('닭' as u32));
    }

    #[test]
    fn test_double_jongseong_split_on_vowel() {
        // 닭 + ㅏ → "달" 확정 (ㄹ 유지), ㄱ+ㅏ = "가"
        let mut state = ImeState::new();
        process_all(&mut state, &[7, 31, 9, 1]);
        let r = state.process_dubeol(31);
        assert_eq!(r, KeyOutcome::emit('달' as u32, '가' as u32));
    }

    #[test]
    fn test_whole_jongseong_migrates() {
        // 갑 + ㅣ → "가" 확정, ㅂ+ㅣ = "비"
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 31, 18]);
        let r = state.process_dubeol(51);
        assert_eq!(r, KeyOutcome::emit('가' as u32, '비' as u32));
    }

    #[test]
    fn test_double_jongseong_then_consonant_emits() {
        // 닭 + ㅅ → "닭" 확정 + 새 초성 ㅅ
        let mut state = ImeState::new();
        process_all(&mut state, &[7, 31, 9, 1]);
        let r = state.process_dubeol(21);
        assert_eq!(r, KeyOutcome::emit('닭' as u32, 0x3145));
    }

    #[test]
    fn test_jongseong_combine_failure_emits() {
        // 간 + ㅋ: ㄴㅋ는 겹받침이 아님 → "간" 확정 + 새 초성 ㅋ
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 31, 4]);
        let r = state.process_dubeol(27);
        assert_eq!(r, KeyOutcome::emit('간' as u32, 0x314B));
    }

    #[test]
    fn test_ssang_consonant_cannot_close_syllable() {
        // 가 + ㄸ: ㄸ는 종성 불가 → "가" 확정 + 새 초성 ㄸ
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 31]);
        let r = state.process_dubeol(8);
        assert_eq!(r, KeyOutcome::emit('가' as u32, 0x3138));
    }

    #[test]
    fn test_ssang_siot_closes_syllable() {
        // ㅆ는 종성이 될 수 있다: 가 + ㅆ → 갔
        let mut state = ImeState::new();
        process_all(&mut state, &[1, 31]);
        let r = state.process_dubeol(22);
        assert_eq!(r, KeyOutcome::replace('갔' as u32));
        // 갔 + ㅏ → "가" 확정, ㅆ+ㅏ = "싸"
        let r = state.process_dubeol(31);
        assert_eq!(r, KeyOutcome::emit('가' as u32, '싸' as u32));
    }

    #[test]
    fn test_consonant_after_consonant_emits() {
        // ㄱ + ㄴ: 쌍자음이 아님 → "ㄱ" 확정 + "ㄴ"
        let mut state = ImeState::new();
        state.process_dubeol(1);
        let r = state.process_dubeol(4);
        assert_eq!(r, KeyOutcome::emit(0x3131, 0x3134));
    }

    #[test]
    fn test_vowel_only_then_vowel() {
        // ㅏ + ㅓ: 결합 불가 → "ㅏ" 확정 + "ㅓ"
        let mut state = ImeState::new();
        state.process_dubeol(31);
        let r = state.process_dubeol(35);
        assert_eq!(r, KeyOutcome::emit(0x314F, 0x3153));
    }

    #[test]
    fn test_moajugi_fills_initial() {
        // 모아주기: ㅏ 다음 ㄱ가 빈 초성을 채워 "가"
        let mut state = ImeState::new();
        let r = process_all(&mut state, &[31, 1]);
        assert_eq!(r, KeyOutcome::replace('가' as u32));
        // 이어서 ㄴ는 종성으로: "간"
        let r = state.process_dubeol(4);
        assert_eq!(r, KeyOutcome::replace('간' as u32));
    }

    #[test]
    fn test_word_hangul() {
        // ㅎㅏㄴㄱㅡㄹ — "한" 확정 후 "글" 조합
        let mut state = ImeState::new();
        process_all(&mut state, &[30, 31, 4]);
        let r = state.process_dubeol(1); // ㄱ — 한+ㄱ는 겹받침 불가
        assert_eq!(r, KeyOutcome::emit('한' as u32, 0x3131));
        let r = process_all(&mut state, &[49, 9]);
        assert_eq!(r, KeyOutcome::replace('글' as u32));
    }

    #[test]
    fn test_backspace_decomposes_han() {
        let mut state = ImeState::new();
        process_all(&mut state, &[30, 31, 4]); // 한
        assert_eq!(state.backspace(), Some('하' as u32));
        assert_eq!(state.backspace(), Some(0x314E)); // ㅎ
        assert_eq!(state.backspace(), None);
        assert!(state.is_empty());
    }

    #[test]
    fn test_backspace_on_double_jongseong_clears_whole_slot() {
        // 닭에서 백스페이스는 ㄺ 전체를 지운다 (한 자리 = 한 단계)
        let mut state = ImeState::new();
        process_all(&mut state, &[7, 31, 9, 1]); // 닭
        assert_eq!(state.backspace(), Some('다' as u32));
    }

    #[test]
    fn test_out_of_range_is_nochange() {
        let mut state = ImeState::new();
        assert_eq!(state.process_dubeol(0), KeyOutcome::none());
        assert_eq!(state.process_dubeol(52), KeyOutcome::none());
        assert_eq!(state.process_dubeol(255), KeyOutcome::none());
        assert!(state.is_empty());
    }

    #[test]
    fn test_state_stays_valid_over_random_walk() {
        // 임의 키 열 뒤에도 투영은 0, 호환 자모, 완성 음절 중 하나다
        let mut state = ImeState::new();
        let keys: Vec<u8> = (0..500).map(|i| ((i * 7 + 3) % 60) as u8).collect();
        for key in keys {
            state.process_dubeol(key);
            let cp = state.to_codepoint();
            assert!(
                cp == 0
                    || (0x3131..=0x3163).contains(&cp)
                    || (0xAC00..=0xD7A3).contains(&cp),
                "잘못된 투영: {cp:#X}"
            );
        }
    }

    #[test]
    fn test_commit_mid_composition() {
        let mut state = ImeState::new();
        process_all(&mut state, &[30, 31]); // 하
        assert_eq!(state.commit(), '하' as u32);
        // commit 후 새 조합이 처음부터 시작된다
        let r = state.process_dubeol(4);
        assert_eq!(r.action, EditAction::Replace);
        assert_eq!(r.current, 0x3134); // ㄴ
    }
}
