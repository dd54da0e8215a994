mod client;
mod models;

pub use client::{QuranClient, QuranProvider};
pub use models::{
    combine_editions, filter_surahs, ApiEnvelope, EditionAyah, EditionSurah, RevelationPlace,
    Surah, SurahText, Verse, SURAH_COUNT,
};
