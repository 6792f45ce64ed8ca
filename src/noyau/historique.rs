// src/noyau/historique.rs

/// Journal des calculs terminés, un par moteur.
///
/// Ordre d’insertion = ordre chronologique (le plus récent en dernier).
/// Pas de déduplication, pas de borne : seul `clear()` le vide.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HistoryLog {
    records: Vec<String>,
}

impl HistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: impl Into<String>) {
        let record = record.into();
        tracing::debug!(%record, "historique");
        self.records.push(record);
    }

    /// Tous les enregistrements, du plus ancien au plus récent.
    pub fn all(&self) -> &[String] {
        &self.records
    }

    /// Ordre du visualiseur : le plus récent d’abord.
    pub fn newest_first(&self) -> impl Iterator<Item = &str> {
        self.records.iter().rev().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
