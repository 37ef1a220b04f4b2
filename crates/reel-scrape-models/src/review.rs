use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Fresh,
    Rotten,
}

impl Freshness {
    /// Parse the literal icon marker published by the review site.
    pub fn from_marker(marker: &str) -> Option<Self> {
        match marker {
            "fresh" => Some(Freshness::Fresh),
            "rotten" => Some(Freshness::Rotten),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Freshness::Fresh => "fresh",
            Freshness::Rotten => "rotten",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_text: String,
    pub score: Option<String>, // raw token after the "/1" -> "/10" correction
    pub freshness: Option<Freshness>,
    pub critic_name: Option<String>,
    pub is_top_critic: bool,
    pub publisher: Option<String>,
    pub review_date: Option<String>,
}

/// Critic reviews stored as parallel columns aligned by review index.
///
/// Columns are only reachable through [`push`](Self::push) and
/// [`append`](Self::append), so every column always has the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReviewCollection {
    review_text: Vec<String>,
    score: Vec<Option<String>>,
    freshness: Vec<Option<Freshness>>,
    critic_name: Vec<Option<String>>,
    top_critic: Vec<bool>,
    publisher: Vec<Option<String>>,
    review_date: Vec<Option<String>>,
}

impl ReviewCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.review_text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.review_text.is_empty()
    }

    pub fn push(&mut self, record: ReviewRecord) {
        self.review_text.push(record.review_text);
        self.score.push(record.score);
        self.freshness.push(record.freshness);
        self.critic_name.push(record.critic_name);
        self.top_critic.push(record.is_top_critic);
        self.publisher.push(record.publisher);
        self.review_date.push(record.review_date);
    }

    /// Append a page-level partial collection onto the end of every column.
    pub fn append(&mut self, mut other: ReviewCollection) {
        self.review_text.append(&mut other.review_text);
        self.score.append(&mut other.score);
        self.freshness.append(&mut other.freshness);
        self.critic_name.append(&mut other.critic_name);
        self.top_critic.append(&mut other.top_critic);
        self.publisher.append(&mut other.publisher);
        self.review_date.append(&mut other.review_date);
    }

    pub fn get(&self, index: usize) -> Option<ReviewRecord> {
        Some(ReviewRecord {
            review_text: self.review_text.get(index)?.clone(),
            score: self.score[index].clone(),
            freshness: self.freshness[index],
            critic_name: self.critic_name[index].clone(),
            is_top_critic: self.top_critic[index],
            publisher: self.publisher[index].clone(),
            review_date: self.review_date[index].clone(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = ReviewRecord> + '_ {
        (0..self.len()).filter_map(move |i| self.get(i))
    }

    pub fn review_texts(&self) -> &[String] {
        &self.review_text
    }

    pub fn scores(&self) -> &[Option<String>] {
        &self.score
    }

    pub fn freshness(&self) -> &[Option<Freshness>] {
        &self.freshness
    }

    pub fn critic_names(&self) -> &[Option<String>] {
        &self.critic_name
    }

    pub fn top_critics(&self) -> &[bool] {
        &self.top_critic
    }

    pub fn publishers(&self) -> &[Option<String>] {
        &self.publisher
    }

    pub fn review_dates(&self) -> &[Option<String>] {
        &self.review_date
    }

    /// Lengths of all seven columns, in declaration order.
    pub fn column_lengths(&self) -> [usize; 7] {
        [
            self.review_text.len(),
            self.score.len(),
            self.freshness.len(),
            self.critic_name.len(),
            self.top_critic.len(),
            self.publisher.len(),
            self.review_date.len(),
        ]
    }

    pub fn count_freshness(&self, freshness: Freshness) -> usize {
        self.freshness.iter().filter(|f| **f == Some(freshness)).count()
    }
}

impl FromIterator<ReviewRecord> for ReviewCollection {
    fn from_iter<I: IntoIterator<Item = ReviewRecord>>(iter: I) -> Self {
        let mut collection = ReviewCollection::new();
        collection.extend(iter);
        collection
    }
}

impl Extend<ReviewRecord> for ReviewCollection {
    fn extend<I: IntoIterator<Item = ReviewRecord>>(&mut self, iter: I) {
        for record in iter {
            self.push(record);
        }
    }
}
