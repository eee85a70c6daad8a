//! Kokoro voice catalog by language.

use crate::envelope::DEFAULT_LANG;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
}

/// A voice the service can speak with. Labels carry the quality grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Voice {
    pub id: &'static str,
    pub label: &'static str,
    pub gender: Gender,
}

const fn female(id: &'static str, label: &'static str) -> Voice {
    Voice {
        id,
        label,
        gender: Gender::Female,
    }
}

const fn male(id: &'static str, label: &'static str) -> Voice {
    Voice {
        id,
        label,
        gender: Gender::Male,
    }
}

/// Language code, display name, voices.
pub const LANGUAGES: &[(&str, &str, &[Voice])] = &[
    (
        "en-us",
        "American English",
        &[
            female("af_heart", "Heart (A)"),
            female("af_bella", "Bella (A-)"),
            female("af_nicole", "Nicole (B-)"),
            female("af_aoede", "Aoede (C+)"),
            female("af_kore", "Kore (C+)"),
            female("af_sarah", "Sarah (C+)"),
            female("af_alloy", "Alloy (C)"),
            female("af_nova", "Nova (C)"),
            female("af_sky", "Sky (C-)"),
            female("af_jessica", "Jessica (D)"),
            female("af_river", "River (D)"),
            male("am_fenrir", "Fenrir (C+)"),
            male("am_michael", "Michael (C+)"),
            male("am_puck", "Puck (C+)"),
            male("am_echo", "Echo (D)"),
            male("am_eric", "Eric (D)"),
            male("am_liam", "Liam (D)"),
            male("am_onyx", "Onyx (D)"),
            male("am_santa", "Santa (D-)"),
            male("am_adam", "Adam (F+)"),
        ],
    ),
    (
        "en-gb",
        "British English",
        &[
            female("bf_emma", "Emma (B-)"),
            female("bf_isabella", "Isabella (C)"),
            female("bf_alice", "Alice (D)"),
            female("bf_lily", "Lily (D)"),
            male("bm_fable", "Fable (C)"),
            male("bm_george", "George (C)"),
            male("bm_lewis", "Lewis (D+)"),
            male("bm_daniel", "Daniel (D)"),
        ],
    ),
    (
        "ja",
        "Japanese",
        &[
            female("jf_alpha", "Alpha (C+)"),
            female("jf_gongitsune", "Gongitsune (C)"),
            female("jf_tebukuro", "Tebukuro (C)"),
            female("jf_nezumi", "Nezumi (C-)"),
            male("jm_kumo", "Kumo (C-)"),
        ],
    ),
    (
        "cmn",
        "Mandarin Chinese",
        &[
            female("zf_xiaobei", "Xiaobei (D)"),
            female("zf_xiaoni", "Xiaoni (D)"),
            female("zf_xiaoxiao", "Xiaoxiao (D)"),
            female("zf_xiaoyi", "Xiaoyi (D)"),
            male("zm_yunjian", "Yunjian (D)"),
            male("zm_yunxi", "Yunxi (D)"),
            male("zm_yunxia", "Yunxia (D)"),
            male("zm_yunyang", "Yunyang (D)"),
        ],
    ),
    (
        "es",
        "Spanish",
        &[
            female("ef_dora", "Dora"),
            male("em_alex", "Alex"),
            male("em_santa", "Santa"),
        ],
    ),
    ("fr-fr", "French", &[female("ff_siwis", "Siwis (B-)")]),
    (
        "hi",
        "Hindi",
        &[
            female("hf_alpha", "Alpha (C)"),
            female("hf_beta", "Beta (C)"),
            male("hm_omega", "Omega (C)"),
            male("hm_psi", "Psi (C)"),
        ],
    ),
    (
        "it",
        "Italian",
        &[female("if_sara", "Sara (C)"), male("im_nicola", "Nicola (C)")],
    ),
    (
        "pt-br",
        "Brazilian Portuguese",
        &[
            female("pf_dora", "Dora"),
            male("pm_alex", "Alex"),
            male("pm_santa", "Santa"),
        ],
    ),
];

/// Voices for `lang`, or the American English set for unknown languages.
pub fn voices_for(lang: &str) -> &'static [Voice] {
    LANGUAGES
        .iter()
        .find(|(code, _, _)| code.eq_ignore_ascii_case(lang))
        .or_else(|| LANGUAGES.iter().find(|(code, _, _)| *code == DEFAULT_LANG))
        .map(|(_, _, voices)| *voices)
        .unwrap_or_default()
}

pub fn is_known_language(lang: &str) -> bool {
    LANGUAGES
        .iter()
        .any(|(code, _, _)| code.eq_ignore_ascii_case(lang))
}

/// The service quietly substitutes its default for voices it doesn't know.
pub fn is_known_voice(id: &str) -> bool {
    LANGUAGES
        .iter()
        .flat_map(|(_, _, voices)| voices.iter())
        .any(|voice| voice.id == id)
}
