use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of surahs in the Quran
pub const SURAH_COUNT: u32 = 114;

/// Where a surah was revealed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationPlace {
    Meccan,
    Medinan,
}

impl RevelationPlace {
    pub fn as_str(&self) -> &'static str {
        match self {
            RevelationPlace::Meccan => "Meccan",
            RevelationPlace::Medinan => "Medinan",
        }
    }
}

/// Surah metadata as listed in the surah index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surah {
    pub number: u32,
    /// Arabic name
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub verse_count: u32,
    pub revelation_place: RevelationPlace,
}

impl Surah {
    /// Check a surah number is within 1-114
    pub fn validate_number(number: u32) -> Result<u32> {
        if (1..=SURAH_COUNT).contains(&number) {
            Ok(number)
        } else {
            Err(Error::InvalidSurah(number))
        }
    }

    /// Case-insensitive match on English name, translated name or number
    pub fn matches(&self, query: &str) -> bool {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return true;
        }
        self.english_name.to_lowercase().contains(&query)
            || self.english_name_translation.to_lowercase().contains(&query)
            || self.number.to_string() == query
    }
}

/// One verse with its Arabic text and translation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verse {
    /// Number within the surah
    pub number: u32,
    pub arabic_text: String,
    pub translation_text: String,
    pub juz: u32,
    pub page: u32,
}

/// A surah with all its verses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurahText {
    pub surah: Surah,
    pub verses: Vec<Verse>,
}

impl SurahText {
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses.iter().find(|v| v.number == number)
    }
}

/// Response wrapper used by every API endpoint.
///
/// Error responses carry a message string in `data`, so the payload is kept
/// untyped until the code has been checked.
#[derive(Debug, Deserialize)]
pub struct ApiEnvelope {
    pub code: u16,
    pub status: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

impl ApiEnvelope {
    /// Decode the payload, turning a non-200 code into [`Error::Api`]
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T> {
        if self.code != 200 {
            let detail = self.data.as_str().unwrap_or(&self.status);
            return Err(Error::Api(format!("{} ({})", detail, self.code)));
        }
        Ok(serde_json::from_value(self.data)?)
    }
}

/// Surah as returned by the API, in one edition
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionSurah {
    pub number: u32,
    pub name: String,
    pub english_name: String,
    pub english_name_translation: String,
    pub number_of_ayahs: u32,
    pub revelation_type: String,
    #[serde(default)]
    pub ayahs: Vec<EditionAyah>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionAyah {
    pub number_in_surah: u32,
    pub text: String,
    #[serde(default)]
    pub juz: u32,
    #[serde(default)]
    pub page: u32,
}

impl From<&EditionSurah> for Surah {
    fn from(s: &EditionSurah) -> Self {
        let revelation_place = if s.revelation_type.eq_ignore_ascii_case("medinan") {
            RevelationPlace::Medinan
        } else {
            RevelationPlace::Meccan
        };
        Surah {
            number: s.number,
            name: s.name.clone(),
            english_name: s.english_name.clone(),
            english_name_translation: s.english_name_translation.clone(),
            verse_count: s.number_of_ayahs,
            revelation_place,
        }
    }
}

/// Zip the Arabic and translation editions of a surah by position.
///
/// Verse numbering, juz and page come from the Arabic edition. Verses
/// missing from the translation get an empty translation text.
pub fn combine_editions(arabic: EditionSurah, translation: Option<EditionSurah>) -> SurahText {
    let surah = Surah::from(&arabic);
    let mut translated = translation
        .map(|t| t.ayahs.into_iter().map(|a| a.text).collect::<Vec<_>>())
        .unwrap_or_default()
        .into_iter();

    let verses = arabic
        .ayahs
        .into_iter()
        .map(|ayah| Verse {
            number: ayah.number_in_surah,
            arabic_text: ayah.text,
            translation_text: translated.next().unwrap_or_default(),
            juz: ayah.juz,
            page: ayah.page,
        })
        .collect();

    SurahText { surah, verses }
}

/// Filter surahs by a search query, keeping index order
pub fn filter_surahs<'a>(surahs: &'a [Surah], query: &str) -> Vec<&'a Surah> {
    surahs.iter().filter(|s| s.matches(query)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARABIC: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": {
            "number": 1,
            "name": "سُورَةُ ٱلْفَاتِحَةِ",
            "englishName": "Al-Faatiha",
            "englishNameTranslation": "The Opening",
            "revelationType": "Meccan",
            "numberOfAyahs": 2,
            "ayahs": [
                {"number": 1, "text": "بِسْمِ ٱللَّهِ", "numberInSurah": 1, "juz": 1, "manzil": 1, "page": 1, "ruku": 1, "hizbQuarter": 1, "sajda": false},
                {"number": 2, "text": "ٱلْحَمْدُ لِلَّهِ", "numberInSurah": 2, "juz": 1, "manzil": 1, "page": 1, "ruku": 1, "hizbQuarter": 1, "sajda": false}
            ]
        }
    }"#;

    const TRANSLATION: &str = r#"{
        "code": 200,
        "status": "OK",
        "data": {
            "number": 1,
            "name": "سُورَةُ ٱلْفَاتِحَةِ",
            "englishName": "Al-Faatiha",
            "englishNameTranslation": "The Opening",
            "revelationType": "Meccan",
            "numberOfAyahs": 2,
            "ayahs": [
                {"number": 1, "text": "In the name of God", "numberInSurah": 1, "juz": 1, "page": 1},
                {"number": 2, "text": "All praise is due to God alone", "numberInSurah": 2, "juz": 1, "page": 1}
            ]
        }
    }"#;

    fn sample_surahs() -> Vec<Surah> {
        vec![
            Surah {
                number: 1,
                name: "الفاتحة".into(),
                english_name: "Al-Faatiha".into(),
                english_name_translation: "The Opening".into(),
                verse_count: 7,
                revelation_place: RevelationPlace::Meccan,
            },
            Surah {
                number: 2,
                name: "البقرة".into(),
                english_name: "Al-Baqara".into(),
                english_name_translation: "The Cow".into(),
                verse_count: 286,
                revelation_place: RevelationPlace::Medinan,
            },
        ]
    }

    #[test]
    fn test_combine_editions_zips_by_position() {
        let arabic: ApiEnvelope = serde_json::from_str(ARABIC).unwrap();
        let translation: ApiEnvelope = serde_json::from_str(TRANSLATION).unwrap();
        let text = combine_editions(
            arabic.into_data().unwrap(),
            Some(translation.into_data().unwrap()),
        );

        assert_eq!(text.surah.english_name, "Al-Faatiha");
        assert_eq!(text.surah.verse_count, 2);
        assert_eq!(text.verses.len(), 2);
        assert_eq!(text.verses[1].number, 2);
        assert_eq!(text.verses[1].translation_text, "All praise is due to God alone");
        assert_eq!(text.verse(1).map(|v| v.juz), Some(1));
    }

    #[test]
    fn test_combine_without_translation() {
        let arabic: ApiEnvelope = serde_json::from_str(ARABIC).unwrap();
        let text = combine_editions(arabic.into_data().unwrap(), None);
        assert!(text.verses.iter().all(|v| v.translation_text.is_empty()));
    }

    #[test]
    fn test_envelope_error_code() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"code": 404, "status": "Not Found", "data": "Surah not found"}"#)
                .unwrap();
        match envelope.into_data::<EditionSurah>() {
            Err(Error::Api(msg)) => assert_eq!(msg, "Surah not found (404)"),
            other => panic!("expected API error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_number() {
        assert!(Surah::validate_number(1).is_ok());
        assert!(Surah::validate_number(114).is_ok());
        assert!(matches!(Surah::validate_number(0), Err(Error::InvalidSurah(0))));
        assert!(matches!(Surah::validate_number(115), Err(Error::InvalidSurah(115))));
    }

    #[test]
    fn test_filter_surahs() {
        let surahs = sample_surahs();
        assert_eq!(filter_surahs(&surahs, "").len(), 2);
        assert_eq!(filter_surahs(&surahs, "cow")[0].number, 2);
        assert_eq!(filter_surahs(&surahs, "FAATIHA")[0].number, 1);
        assert_eq!(filter_surahs(&surahs, "2")[0].english_name, "Al-Baqara");
        assert!(filter_surahs(&surahs, "kahf").is_empty());
    }
}
