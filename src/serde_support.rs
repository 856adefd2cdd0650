use crate::board::{State, StateRecord};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

// Wire form: "<first mask hex>:<second mask hex>:<next player>:<token count>",
// e.g. "0000000000000000:0400000000000000:0:1"

impl Serialize for StateRecord {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let full = format!(
            "{:016x}:{:016x}:{}:{}",
            self.ownership[0], self.ownership[1], self.next_player, self.token_count
        );
        serializer.serialize_str(&full)
    }
}

impl<'de> Deserialize<'de> for StateRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(serde::de::Error::custom(format!(
                "Invalid state format: {}",
                s
            )));
        }

        let first = u64::from_str_radix(parts[0], 16)
            .map_err(|e| serde::de::Error::custom(format!("Invalid first mask: {}", e)))?;
        let second = u64::from_str_radix(parts[1], 16)
            .map_err(|e| serde::de::Error::custom(format!("Invalid second mask: {}", e)))?;
        let next_player: u8 = parts[2]
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid next player: {}", e)))?;
        let token_count: u8 = parts[3]
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("Invalid token count: {}", e)))?;

        Ok(StateRecord {
            ownership: [first, second],
            next_player,
            token_count,
        })
    }
}

/// States serialize as their record; deserialize a [`StateRecord`] and pass
/// it to [`State::from_record`] with the table to get one back.
impl Serialize for State<'_> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.record().serialize(serializer)
    }
}
