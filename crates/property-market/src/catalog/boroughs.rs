use serde::Serialize;

/// A London borough and its cell on the borough map grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Borough {
    pub name: String,
    pub abbreviation: String,
    pub column: u8,
    pub row: u8,
}

impl Borough {
    pub fn new(name: &str, column: u8, row: u8) -> Self {
        Self {
            name: name.to_string(),
            abbreviation: abbreviate(name),
            column,
            row,
        }
    }
}

/// First four characters of the name, upper-cased.
pub fn abbreviate(name: &str) -> String {
    name.chars().take(4).collect::<String>().to_uppercase()
}

const LONDON_BOROUGHS: &[(&str, u8, u8)] = &[
    ("Enfield", 7, 0),
    ("Barnet", 4, 1),
    ("Haringey", 6, 1),
    ("Waltham Forest", 8, 1),
    ("Harrow", 1, 2),
    ("Brent", 3, 2),
    ("Camden", 5, 2),
    ("Islington", 7, 2),
    ("Hackney", 9, 2),
    ("Redbridge", 11, 2),
    ("Havering", 13, 2),
    ("Hillingdon", 0, 3),
    ("Ealing", 2, 3),
    ("Kensington and Chelsea", 4, 3),
    ("Westminster", 6, 3),
    ("Tower Hamlets", 8, 3),
    ("Newham", 10, 3),
    ("Barking and Dagenham", 12, 3),
    ("Hounslow", 1, 4),
    ("Hammersmith and Fulham", 3, 4),
    ("Wandsworth", 5, 4),
    ("City of London", 7, 4),
    ("Greenwich", 9, 4),
    ("Bexley", 11, 4),
    ("Richmond upon Thames", 2, 5),
    ("Merton", 4, 5),
    ("Lambeth", 6, 5),
    ("Southwark", 8, 5),
    ("Lewisham", 10, 5),
    ("Kingston upon Thames", 3, 6),
    ("Sutton", 5, 6),
    ("Croydon", 7, 6),
    ("Bromley", 9, 6),
];

/// Static borough reference table supplied to the catalog.
#[derive(Debug, Clone)]
pub struct BoroughTable {
    boroughs: Vec<Borough>,
}

impl BoroughTable {
    pub fn london() -> Self {
        Self::from_boroughs(
            LONDON_BOROUGHS
                .iter()
                .map(|(name, column, row)| Borough::new(name, *column, *row))
                .collect(),
        )
    }

    pub fn from_boroughs(boroughs: Vec<Borough>) -> Self {
        Self { boroughs }
    }

    pub fn len(&self) -> usize {
        self.boroughs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boroughs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Borough> {
        self.boroughs.iter()
    }

    pub fn by_name(&self, name: &str) -> Option<&Borough> {
        self.boroughs.iter().find(|borough| borough.name == name)
    }

    pub fn by_abbreviation(&self, abbreviation: &str) -> Option<&Borough> {
        self.boroughs
            .iter()
            .find(|borough| borough.abbreviation.eq_ignore_ascii_case(abbreviation))
    }

    pub fn abbreviation_of(&self, name: &str) -> Option<&str> {
        self.by_name(name).map(|borough| borough.abbreviation.as_str())
    }

    /// Resolves either a full borough name or its abbreviation.
    pub fn resolve(&self, name_or_abbreviation: &str) -> Option<&Borough> {
        let needle = name_or_abbreviation.trim();
        self.boroughs
            .iter()
            .find(|borough| borough.name.eq_ignore_ascii_case(needle))
            .or_else(|| self.by_abbreviation(needle))
    }

    pub fn remove(&mut self, name: &str) -> Option<Borough> {
        let index = self.boroughs.iter().position(|borough| borough.name == name)?;
        Some(self.boroughs.remove(index))
    }
}

impl Default for BoroughTable {
    fn default() -> Self {
        Self::london()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn london_table_has_unique_abbreviations() {
        let table = BoroughTable::london();
        assert_eq!(table.len(), 33);

        let abbreviations: HashSet<_> = table.iter().map(|b| b.abbreviation.as_str()).collect();
        assert_eq!(abbreviations.len(), 33);
        assert_eq!(table.abbreviation_of("Enfield"), Some("ENFI"));
        assert_eq!(
            table.by_abbreviation("KENS").map(|b| b.name.as_str()),
            Some("Kensington and Chelsea")
        );
    }

    #[test]
    fn resolve_accepts_names_and_abbreviations() {
        let table = BoroughTable::london();
        assert_eq!(table.resolve("camden").map(|b| b.column), Some(5));
        assert_eq!(table.resolve("WEST").map(|b| b.name.as_str()), Some("Westminster"));
        assert!(table.resolve("Atlantis").is_none());
    }

    #[test]
    fn removed_borough_no_longer_resolves() {
        let mut table = BoroughTable::london();
        let removed = table.remove("Sutton").expect("sutton present");
        assert_eq!(removed.abbreviation, "SUTT");
        assert_eq!(table.len(), 32);
        assert!(table.by_name("Sutton").is_none());
    }
}
