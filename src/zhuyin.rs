//! Zhuyin (Bopomofo) phonetic data: the spelling table for common
//! Traditional-Chinese characters and the physical-key layout used by the
//! Microsoft Bopomofo IME.

use std::collections::HashMap;

/// Tone diacritics. Never emitted as keystrokes, regardless of layout.
pub const TONE_MARKS: [char; 4] = ['ˊ', 'ˇ', 'ˋ', '˙'];

pub fn is_tone_mark(c: char) -> bool {
    TONE_MARKS.contains(&c)
}

/// Spelling -> target text, in table order. Multi-character targets are kept
/// for reference but only single-character targets participate in the
/// per-character reverse index.
pub const SPELLING_TABLE: &[(&str, &str)] = &[
    ("ㄋㄧˇ", "你"),
    ("ㄏㄠˇ", "好"),
    ("ㄨㄛˇ", "我"),
    ("ㄕˋ", "是"),
    ("ㄧ", "一"),
    ("ㄍㄜˋ", "個"),
    ("ㄒㄩㄝˊ", "學"),
    ("ㄕㄥ", "生"),
    ("ㄉㄜ˙", "的"),
    ("ㄌㄜ˙", "了"),
    ("ㄋㄜ˙", "呢"),
    ("ㄇㄚ˙", "嗎"),
    ("ㄅㄨˋ", "不"),
    ("ㄧㄡˇ", "有"),
    ("ㄇㄟˊ", "沒"),
    ("ㄗㄞˋ", "在"),
    ("ㄏㄜˊ", "和"),
    ("ㄧㄝˇ", "也"),
    ("ㄏㄣˇ", "很"),
    ("ㄉㄡ", "都"),
    ("ㄏㄞˊ", "還"),
    ("ㄐㄧㄡˋ", "就"),
    ("ㄎㄜˇㄧˇ", "可以"),
    ("ㄧㄥ", "應"),
    ("ㄍㄞ", "該"),
    ("ㄦˋ", "二"),
    ("ㄙㄢ", "三"),
    ("ㄙˋ", "四"),
    ("ㄨˇ", "午"),
    ("ㄌㄧㄡˋ", "六"),
    ("ㄑㄧ", "七"),
    ("ㄅㄚ", "八"),
    ("ㄐㄧㄡˇ", "九"),
    ("ㄕˊ", "十"),
    ("ㄅㄞˇ", "百"),
    ("ㄑㄧㄢ", "千"),
    ("ㄨㄢˋ", "萬"),
    ("ㄅㄚˋㄅㄚ˙", "爸爸"),
    ("ㄇㄚㄇㄚ˙", "媽媽"),
    ("ㄅㄚˋ", "爸"),
    ("ㄇㄚ", "媽"),
    ("ㄍㄜ", "哥"),
    ("ㄐㄧㄝˇ", "姐"),
    ("ㄉㄧˋ", "弟"),
    ("ㄇㄟˋ", "妹"),
    ("ㄐㄧㄚ", "家"),
    ("ㄐㄧㄚㄊㄧㄥˊ", "家庭"),
    ("ㄔ", "吃"),
    ("ㄏㄜ", "喝"),
    ("ㄗㄡˇ", "走"),
    ("ㄆㄠˇ", "跑"),
    ("ㄎㄢˋ", "看"),
    ("ㄊㄧㄥ", "聽"),
    ("ㄕㄨㄛ", "說"),
    ("ㄒㄧㄝˇ", "寫"),
    ("ㄉㄨˊ", "讀"),
    ("ㄐㄧㄠ", "教"),
    ("ㄌㄞˊ", "來"),
    ("ㄑㄩˋ", "去"),
    ("ㄏㄨㄟˊ", "回"),
    ("ㄗㄨㄛˋ", "作"),
    ("ㄍㄨㄥ", "工"),
    ("ㄒㄧㄤˇ", "想"),
    ("ㄓˉ", "知"),
    ("ㄉㄠˋ", "道"),
    ("ㄓˉㄉㄠˋ", "知道"),
    ("ㄖㄣˊㄨㄟˊ", "認為"),
    ("ㄒㄧㄤ", "相"),
    ("ㄒㄧㄣˋ", "信"),
    ("ㄒㄧㄤㄒㄧㄣˋ", "相信"),
    ("ㄒㄧ", "希"),
    ("ㄨㄤˋ", "望"),
    ("ㄒㄧㄨㄤˋ", "希望"),
    ("ㄐㄧㄣ", "今"),
    ("ㄊㄧㄢ", "天"),
    ("ㄐㄧㄣㄊㄧㄢ", "今天"),
    ("ㄇㄧㄥˊ", "明"),
    ("ㄇㄧㄥˊㄊㄧㄢ", "明天"),
    ("ㄗㄨㄛˊ", "昨"),
    ("ㄗㄨㄛˊㄊㄧㄢ", "昨天"),
    ("ㄕㄤˋ", "上"),
    ("ㄒㄧㄚˋ", "下"),
    ("ㄨㄢˇ", "晚"),
    ("ㄕㄤˋㄨˇ", "上午"),
    ("ㄒㄧㄚˋㄨˇ", "下午"),
    ("ㄨㄢˇㄕㄤˋ", "晚上"),
    ("ㄒㄧㄢˋㄗㄞˋ", "現在"),
    ("ㄧˇㄑㄧㄢˊ", "以前"),
    ("ㄧˇㄏㄡˋ", "以後"),
    ("ㄕˊㄏㄡˋ", "時候"),
    ("ㄕˊㄐㄧㄢ", "時間"),
    ("ㄒㄩㄝˊㄒㄧㄠˋ", "學校"),
    ("ㄌㄠˇㄕ", "老師"),
    ("ㄕㄨ", "書"),
    ("ㄅㄧˇ", "筆"),
    ("ㄓˇ", "紙"),
    ("ㄎㄜˋ", "課"),
    ("ㄗㄨㄛˋㄧㄝˋ", "作業"),
    ("ㄎㄠˇㄕˋ", "考試"),
    ("ㄔㄥˊㄐㄧˋ", "成績"),
    ("ㄉㄧˋㄈㄤ", "地方"),
    ("ㄔㄥˊㄕˋ", "程式"),
    ("ㄍㄨㄛˊㄐㄧㄚ", "國家"),
    ("ㄓㄜˋㄌㄧˇ", "這裡"),
    ("ㄋㄚˋㄌㄧˇ", "那裡"),
    ("ㄋㄚˇㄌㄧˇ", "哪裡"),
    ("ㄉㄨㄥㄒㄧ", "東西"),
    ("ㄕˋㄑㄧㄥˊ", "事情"),
    ("ㄞˋ", "愛"),
    ("ㄒㄧˇㄏㄨㄢ", "喜歡"),
    ("ㄍㄠ", "高"),
    ("ㄉㄧ", "低"),
    ("ㄉㄚˋ", "大"),
    ("ㄒㄧㄠˇ", "小"),
    ("ㄉㄨㄛ", "多"),
    ("ㄕㄠˇ", "少"),
    ("ㄔㄤˊ", "長"),
    ("ㄉㄨㄢˇ", "短"),
    ("ㄏㄨㄞˋ", "壞"),
    ("ㄇㄟˇㄌㄧˋ", "美麗"),
    ("ㄆㄧㄠˋㄌㄧㄤˋ", "漂亮"),
    ("ㄔㄡˇ", "醜"),
    ("ㄕㄣˊㄇㄜ˙", "什麼"),
    ("ㄨㄟˊㄕㄣˊㄇㄜ˙", "為什麼"),
    ("ㄗㄣˇㄇㄜ˙", "怎麼"),
    ("ㄕㄟˊ", "誰"),
    ("ㄏㄨㄥˊ", "紅"),
    ("ㄌㄩˋ", "綠"),
    ("ㄌㄢˊ", "藍"),
    ("ㄏㄨㄤˊ", "黃"),
    ("ㄅㄞˊ", "白"),
    ("ㄏㄟ", "黑"),
    ("ㄧㄢˊㄙㄜˋ", "顏色"),
    ("ㄑㄧㄢˊ", "錢"),
    ("ㄍㄨㄥㄙ", "公司"),
    ("ㄕㄤㄉㄧㄢˋ", "商店"),
    ("ㄕˋㄔㄤˇ", "市場"),
    ("ㄇㄞˇ", "買"),
    ("ㄇㄞˋ", "賣"),
    ("ㄐㄧㄚˋㄍㄜˊ", "價格"),
    ("ㄔㄜ", "車"),
    ("ㄈㄟㄐㄧ", "飛機"),
    ("ㄏㄨㄛˇㄔㄜ", "火車"),
    ("ㄍㄨㄥㄔㄜ", "公車"),
    ("ㄐㄧㄠˇㄊㄚˋㄔㄜ", "腳踏車"),
    ("ㄗㄡˇㄌㄨˋ", "走路"),
    ("ㄎㄞㄔㄜ", "開車"),
    ("ㄗㄨㄛˋㄔㄜ", "坐車"),
    ("ㄧㄩㄢˋ", "醫院"),
    ("ㄧㄕㄥ", "醫生"),
    ("ㄏㄨˋㄕˋ", "護士"),
    ("ㄅㄧㄥˋ", "病"),
    ("ㄐㄧㄢˋㄎㄤ", "健康"),
    ("ㄧㄠˋ", "藥"),
    ("ㄓˋㄌㄧㄠˊ", "治療"),
    ("ㄐㄧㄢˇㄔㄚˊ", "檢查"),
    ("ㄉㄧㄢˋㄋㄠˇ", "電腦"),
    ("ㄕㄡˇㄐㄧ", "手機"),
    ("ㄨㄤˇㄌㄨˋ", "網路"),
    ("ㄨㄤˇㄓˋ", "網站"),
    ("ㄧㄡˊㄐㄧㄢˋ", "郵件"),
    ("ㄒㄩㄣˋㄒㄧˊ", "訊息"),
    ("ㄎㄜㄐㄧˋ", "科技"),
    ("ㄓㄜˋ", "著"),
    ("ㄍㄨㄛˋ", "過"),
    ("ㄅㄟˋ", "被"),
    ("ㄅㄚˇ", "把"),
    ("ㄧㄣㄨㄟˊ", "因為"),
    ("ㄙㄨㄛˇㄧˇ", "所以"),
    ("ㄖㄨˊㄍㄨㄛˇ", "如果"),
    ("ㄉㄢˋㄕˋ", "但是"),
    ("ㄏㄞˊㄕˋ", "還是"),
    ("ㄓˉㄧㄠˋ", "只要"),
    ("ㄓˉㄗㄞˋ", "只在"),
];

/// Physical key for each of the 37 phonetic symbols on the standard
/// Microsoft Bopomofo layout (number row, QWERTY row, home row, bottom row).
pub fn symbol_key(sym: char) -> Option<char> {
    let key = match sym {
        // number row
        'ㄅ' => '1',
        'ㄉ' => '2',
        'ㄓ' => '3',
        'ㄏ' => '4',
        'ㄐ' => '5',
        'ㄔ' => '6',
        'ㄗ' => '7',
        'ㄘ' => '8',
        'ㄙ' => '9',
        'ㄖ' => '0',
        // QWERTY row
        'ㄆ' => 'q',
        'ㄊ' => 'w',
        'ㄍ' => 'e',
        'ㄎ' => 'r',
        'ㄑ' => 't',
        'ㄕ' => 'y',
        'ㄞ' => 'u',
        'ㄟ' => 'i',
        'ㄠ' => 'o',
        'ㄡ' => 'p',
        // home row
        'ㄇ' => 'a',
        'ㄋ' => 's',
        'ㄌ' => 'd',
        'ㄒ' => 'f',
        'ㄢ' => 'g',
        'ㄣ' => 'h',
        'ㄤ' => 'j',
        'ㄥ' => 'k',
        'ㄦ' => 'l',
        'ㄧ' => ';',
        // bottom row
        'ㄈ' => 'z',
        'ㄨ' => 'x',
        'ㄩ' => 'c',
        'ㄚ' => 'v',
        'ㄛ' => 'b',
        'ㄜ' => 'n',
        'ㄝ' => 'm',
        _ => return None,
    };
    Some(key)
}

/// Convert a phonetic spelling to the physical keys that produce it.
///
/// Pure and deterministic. Tone marks never emit a key; symbols without a
/// layout position are skipped with a diagnostic rather than failing the
/// whole character.
pub fn spelling_to_keys(spelling: &str) -> Vec<char> {
    let mut keys = Vec::new();
    for sym in spelling.chars() {
        if is_tone_mark(sym) {
            continue;
        }
        match symbol_key(sym) {
            Some(key) => keys.push(key),
            None => {
                eprintln!("warning: no key mapping for phonetic symbol '{sym}' (U+{:04X})", sym as u32);
            }
        }
    }
    keys
}

/// Reverse index over [`SPELLING_TABLE`]: ideograph -> spelling, built once.
/// First table entry for a character wins, matching table iteration order.
#[derive(Debug, Clone)]
pub struct PhoneticTable {
    by_char: HashMap<char, &'static str>,
}

impl PhoneticTable {
    pub fn new() -> Self {
        let mut by_char = HashMap::new();
        for (spelling, target) in SPELLING_TABLE {
            let mut chars = target.chars();
            let (Some(c), None) = (chars.next(), chars.next()) else {
                continue;
            };
            by_char.entry(c).or_insert(*spelling);
        }
        Self { by_char }
    }

    /// Spelling for one ideograph, if the table covers it.
    pub fn spelling_for(&self, c: char) -> Option<&'static str> {
        self.by_char.get(&c).copied()
    }
}

impl Default for PhoneticTable {
    fn default() -> Self {
        Self::new()
    }
}
