use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single translatable word pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WordEntry {
    pub english: String,
    pub translation: String,
}

impl WordEntry {
    pub fn new(english: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            translation: translation.into(),
        }
    }
}

/// Read-only word list every quiz batch is drawn from.
#[derive(Debug, Clone)]
pub struct WordBank {
    entries: Vec<WordEntry>,
}

impl WordBank {
    /// Builds a bank from arbitrary entries. Later duplicates of an english
    /// term are dropped so that every option string in a choice question is
    /// unambiguous.
    pub fn new(entries: Vec<WordEntry>) -> Self {
        let mut seen = HashSet::new();
        let entries = entries
            .into_iter()
            .filter(|e| seen.insert(e.english.clone()))
            .collect();
        Self { entries }
    }

    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_WORDS
                .iter()
                .map(|(en, zh)| WordEntry::new(*en, *zh))
                .collect(),
        )
    }

    pub fn all(&self) -> &[WordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn find(&self, english: &str) -> Option<&WordEntry> {
        self.entries.iter().find(|e| e.english == english)
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::builtin()
    }
}

const BUILTIN_WORDS: &[(&str, &str)] = &[
    // Unit 1: Greetings and Small Talk
    ("accountant", "會計師"),
    ("adore", "崇拜"),
    ("assistant", "助手"),
    ("audition", "試鏡"),
    ("bachelor's degree", "學位"),
    ("career", "生涯"),
    ("certified", "被證明的"),
    ("community", "社區"),
    ("creature", "生物"),
    ("director", "導演"),
    ("errand", "差事"),
    ("flexible", "彈性的"),
    ("flight attendant", "空服員"),
    ("grab a bite", "匆忙吃"),
    ("international", "國際性的"),
    ("lawyer", "律師"),
    ("major", "主修科目"),
    ("meet up", "會面"),
    ("motion picture", "電影"),
    ("neighborhood", "鄰近地區"),
    ("original", "原來的"),
    ("photography", "攝影術"),
    ("profile", "人物簡介"),
    ("recommendation", "推薦"),
    ("relief", "緩和"),
    ("sophomore", "大二"),
    ("swear", "發誓"),
    ("tempting", "誘人的"),
    ("transfer", "調任"),
    ("wage", "工資"),
    // Unit 2: Leisure Time
    ("arrange", "安排"),
    ("badminton", "羽毛球"),
    ("barbecue", "烤肉"),
    ("binge", "追劇"),
    ("chill", "放鬆"),
    ("club", "社團"),
    ("compromise", "妥協"),
    ("concert", "音樂會"),
    ("costume", "戲服"),
    ("embarrassed", "尷尬的"),
    ("episode", "一集"),
    ("equipment", "設備"),
    ("exhibit", "展示"),
    ("gardening", "園藝"),
    ("green thumb", "園藝技能"),
    ("hilarious", "極其滑稽的"),
    ("injured", "受傷的"),
    ("inspired", "受啟發的"),
    ("participant", "參與者"),
    ("rent", "租用"),
    ("rush", "匆忙"),
    ("selfie", "自拍"),
    ("stunning", "令人震驚的"),
    ("tag", "標記"),
    // Unit 3: Relationships
    ("admiration", "欽佩"),
    ("babysit", "臨時保母"),
    ("check on", "檢查"),
    ("contact", "與...聯繫"),
    ("counselor", "顧問"),
    ("depressed", "沮喪的"),
    ("discouraging", "令人沮喪的"),
    ("embarrassing", "令人尷尬的"),
    ("exhausted", "精疲力盡的"),
    ("feast", "盛宴"),
    ("hairdresser", "美髮師"),
    ("host", "主持"),
    ("memory", "回憶"),
    ("organize", "組織"),
    ("responsible", "負責任的"),
    ("social", "社交的"),
    ("strength", "強度"),
    ("strike up", "開始交談"),
    ("task", "任務"),
    ("tutor", "家庭教師"),
    ("venue", "發生地"),
    // Unit 4: Living Arrangements
    ("accommodation", "住宿"),
    ("backyard", "後院"),
    ("belongings", "家當"),
    ("carpet", "地毯"),
    ("counter", "料理枱"),
    ("digs", "寓所"),
    ("dorm", "宿舍"),
    ("environment", "環境"),
    ("financial", "財政的"),
    ("flood", "淹沒"),
    ("homeless", "無家的"),
    ("host family", "寄宿家庭"),
    ("housewarming", "喬遷"),
    ("marriage", "婚姻"),
    ("mess", "混亂"),
    ("occasion", "場合"),
    ("pad", "房間"),
    ("rack", "架子"),
    ("rearrange", "重新安排"),
    ("roommate", "室友"),
    ("settle", "定居"),
    ("shelter", "庇護所"),
    ("shower", "淋浴間"),
    ("stressful", "壓力大的"),
    ("suitcase", "行李箱"),
    ("tent", "帳棚"),
    ("unpack", "取出"),
    ("unplugged", "不插電的"),
];
