//! JSON5 사용자 자판 스키마
//!
//! 내장 자판은 const 테이블이지만, 변형 자판(세벌식 390 등)은 JSON5
//! 문서로 싣는다. 두벌식 keymap 값은 호환 자모 코드포인트, 세벌식
//! keymap 값은 위치 자모(U+1100/U+1161/U+11A8 블록) 코드포인트다 —
//! 키의 역할(초/중/종)이 유니코드 블록에 실려 온다. 그 외 값은
//! 리터럴 문자로 취급한다.

use std::collections::HashMap;

use serde::Deserialize;

use super::{DubeolLayout, SebeolLayout};
use crate::layout;
use crate::unicode;

/// 자판 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutKind {
    Dubeol,
    Sebeol,
}

/// JSON5 자판 최상위 스키마
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutSchema {
    /// 자판 식별자 (예: "3-390")
    pub id: String,
    /// 자판 이름 (예: "세벌식 390")
    pub name: String,
    /// 자판 종류
    #[serde(rename = "type")]
    pub kind: LayoutKind,
    /// 키 → 코드포인트 매핑 (16진수 문자열, 예: "0x1100")
    pub keymap: HashMap<String, String>,
}

impl LayoutSchema {
    /// JSON5 문자열에서 스키마를 파싱한다.
    pub fn parse(json: &str) -> Result<Self, String> {
        json5::from_str(json).map_err(|e| format!("JSON5 parse error: {e}"))
    }
}

/// 16진수 문자열("0x3131" 등)을 코드포인트로 변환
fn parse_hex_cp(s: &str) -> Option<u32> {
    let hex = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X"))?;
    let cp = u32::from_str_radix(hex, 16).ok()?;
    char::from_u32(cp)?;
    Some(cp)
}

/// 키 문자열이 단일 ASCII 문자인지 확인
fn single_ascii_key(key: &str) -> Option<u8> {
    let mut chars = key.chars();
    let c = chars.next()?;
    if chars.next().is_some() || !c.is_ascii() {
        return None;
    }
    Some(c as u8)
}

impl DubeolLayout {
    /// JSON5 두벌식 자판을 파싱한다.
    ///
    /// 키는 a~z / A~Z 한 글자. 소문자 키가 기본 줄을 채우고, 기본 줄이
    /// 시프트 줄에 복사된 뒤 대문자 키가 시프트 줄을 덮어쓴다.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let schema = LayoutSchema::parse(json)?;
        if schema.kind != LayoutKind::Dubeol {
            return Err(format!("{}: 두벌식 자판이 아님", schema.id));
        }

        let mut base = [0u8; 26];
        let mut shift = [0u8; 26];

        let mut decoded = Vec::with_capacity(schema.keymap.len());
        for (key, hex) in &schema.keymap {
            let k = single_ascii_key(key)
                .ok_or_else(|| format!("잘못된 키: {key:?}"))?;
            let cp = parse_hex_cp(hex)
                .ok_or_else(|| format!("잘못된 코드포인트: {key} → {hex}"))?;
            if !unicode::is_jamo(cp) {
                return Err(format!("호환 자모가 아님: {key} → {hex}"));
            }
            decoded.push((k, (cp - unicode::COMPAT_BASE) as u8));
        }

        // 기본 줄 먼저, 시프트 줄은 그 위에 겹친다
        for &(k, offset) in &decoded {
            if k.is_ascii_lowercase() {
                base[(k - b'a') as usize] = offset;
            }
        }
        shift.copy_from_slice(&base);
        for &(k, offset) in &decoded {
            if k.is_ascii_uppercase() {
                shift[(k - b'A') as usize] = offset;
            }
        }

        Ok(DubeolLayout { base, shift })
    }
}

impl SebeolLayout {
    /// JSON5 세벌식 자판을 파싱한다.
    ///
    /// 위치 자모 값은 역할별 오프셋 인코딩으로, 그 외 값은 리터럴로
    /// 변환해 94칸 테이블을 채운다. 리터럴이 오프셋 인코딩 구간과
    /// 겹치면 거부한다.
    pub fn from_json(json: &str) -> Result<Self, String> {
        let schema = LayoutSchema::parse(json)?;
        if schema.kind != LayoutKind::Sebeol {
            return Err(format!("{}: 세벌식 자판이 아님", schema.id));
        }

        let mut entries = [0u32; 94];
        for (key, hex) in &schema.keymap {
            let k = single_ascii_key(key)
                .ok_or_else(|| format!("잘못된 키: {key:?}"))?;
            if !(33..=126).contains(&k) {
                return Err(format!("자판 범위 밖 키: {key:?}"));
            }
            let cp = parse_hex_cp(hex)
                .ok_or_else(|| format!("잘못된 코드포인트: {key} → {hex}"))?;
            entries[(k - 33) as usize] = encode_entry(cp)
                .ok_or_else(|| format!("인코딩 불가: {key} → {hex}"))?;
        }

        Ok(SebeolLayout { entries })
    }
}

/// 위치 자모/리터럴 코드포인트를 세벌식 테이블 엔트리 값으로 바꾼다.
fn encode_entry(cp: u32) -> Option<u32> {
    // 위치 초성 (U+1100~U+1112)
    if (unicode::L_BASE..unicode::L_BASE + unicode::L_COUNT).contains(&cp) {
        let offset = layout::choseong_to_offset(cp - unicode::L_BASE)?;
        return Some(offset as u32 + 92);
    }
    // 위치 중성 (U+1161~U+1175)
    if (unicode::V_BASE..unicode::V_BASE + unicode::V_COUNT).contains(&cp) {
        let offset = layout::jungseong_to_offset(cp - unicode::V_BASE)?;
        return Some(offset as u32 + 35);
    }
    // 위치 종성 (U+11A8~U+11C2)
    if (unicode::T_BASE + 1..unicode::T_BASE + unicode::T_COUNT).contains(&cp) {
        let offset = layout::jongseong_to_offset(cp - unicode::T_BASE)?;
        return Some(offset as u32);
    }
    // 리터럴 — 오프셋 인코딩 구간과 겹치면 표현 불가
    if matches!(cp, 1..=30 | 66..=86 | 93..=122) {
        return None;
    }
    Some(cp)
}
