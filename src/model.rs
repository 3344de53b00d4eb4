//! Player record types shared by validation, storage and handlers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Playing role. Serialized with the exact labels clients send.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Batsman,
    Bowler,
    #[serde(rename = "All-rounder")]
    AllRounder,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Batsman, Role::Bowler, Role::AllRounder];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Batsman => "Batsman",
            Role::Bowler => "Bowler",
            Role::AllRounder => "All-rounder",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| format!("unknown role '{}'", s))
    }
}

/// A validated player payload, as accepted by create and update.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewPlayer {
    pub name: String,
    pub team: String,
    pub country: String,
    pub runs: i64,
    pub image: String,
    pub role: Role,
    pub salary: f64,
}

/// A persisted player.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: Uuid,
    pub name: String,
    pub team: String,
    pub country: String,
    pub runs: i64,
    pub image: String,
    pub role: Role,
    pub salary: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Player {
    /// Builds a stored record from a payload with store-assigned identity and timestamps.
    pub fn from_new(id: Uuid, input: NewPlayer, now: DateTime<Utc>) -> Self {
        Player {
            id,
            name: input.name,
            team: input.team,
            country: input.country,
            runs: input.runs,
            image: input.image,
            role: input.role,
            salary: input.salary,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replaces every mutable field and bumps `updated_at`; id and `created_at` are kept.
    pub fn apply(&mut self, input: NewPlayer, now: DateTime<Utc>) {
        self.name = input.name;
        self.team = input.team;
        self.country = input.country;
        self.runs = input.runs;
        self.image = input.image;
        self.role = input.role;
        self.salary = input.salary;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_labels_round_trip_through_from_str() {
        for role in Role::ALL {
            assert_eq!(role.as_str().parse::<Role>(), Ok(role));
        }
        assert!("all-rounder".parse::<Role>().is_err());
    }

    #[test]
    fn player_serializes_with_camel_case_timestamps() {
        let now = Utc::now();
        let p = Player::from_new(
            Uuid::new_v4(),
            NewPlayer {
                name: "A".into(),
                team: "X".into(),
                country: "Y".into(),
                runs: 50,
                image: "http://i/a.png".into(),
                role: Role::AllRounder,
                salary: 100000.0,
            },
            now,
        );
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["role"], "All-rounder");
        assert!(v.get("createdAt").is_some());
        assert!(v.get("updatedAt").is_some());
        assert!(v.get("created_at").is_none());
    }
}
