use bytes::{Buf, BufMut};
use commonware_codec::{Error, FixedSize, Read, ReadExt, Write};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error as ThisError;

/// Every game the compiler knows how to price.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum GameKey {
    Dice = 0,
    HiLo = 1,
    Magic8Ball = 2,
    Flip = 3,
    Mines = 4,
    Keno = 5,
    Limbo = 6,
    Crash = 7,
    ProgressivePoker = 8,
    Blackjack = 9,
    Slots = 10,
    Plinko = 11,
    Roulette = 12,
}

impl GameKey {
    pub const ALL: [GameKey; 13] = [
        GameKey::Dice,
        GameKey::HiLo,
        GameKey::Magic8Ball,
        GameKey::Flip,
        GameKey::Mines,
        GameKey::Keno,
        GameKey::Limbo,
        GameKey::Crash,
        GameKey::ProgressivePoker,
        GameKey::Blackjack,
        GameKey::Slots,
        GameKey::Plinko,
        GameKey::Roulette,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GameKey::Dice => "dice",
            GameKey::HiLo => "hilo",
            GameKey::Magic8Ball => "magic8ball",
            GameKey::Flip => "flip",
            GameKey::Mines => "mines",
            GameKey::Keno => "keno",
            GameKey::Limbo => "limbo",
            GameKey::Crash => "crash",
            GameKey::ProgressivePoker => "progressivepoker",
            GameKey::Blackjack => "blackjack",
            GameKey::Slots => "slots",
            GameKey::Plinko => "plinko",
            GameKey::Roulette => "roulette",
        }
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
#[error("unknown game: {0}")]
pub struct UnknownGame(pub String);

impl FromStr for GameKey {
    type Err = UnknownGame;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        GameKey::ALL
            .into_iter()
            .find(|key| key.as_str() == lowered)
            .ok_or(UnknownGame(s.to_string()))
    }
}

impl Write for GameKey {
    fn write(&self, writer: &mut impl BufMut) {
        (*self as u8).write(writer);
    }
}

impl Read for GameKey {
    type Cfg = ();

    fn read_cfg(reader: &mut impl Buf, _: &Self::Cfg) -> Result<Self, Error> {
        let value = u8::read(reader)?;
        match value {
            0 => Ok(Self::Dice),
            1 => Ok(Self::HiLo),
            2 => Ok(Self::Magic8Ball),
            3 => Ok(Self::Flip),
            4 => Ok(Self::Mines),
            5 => Ok(Self::Keno),
            6 => Ok(Self::Limbo),
            7 => Ok(Self::Crash),
            8 => Ok(Self::ProgressivePoker),
            9 => Ok(Self::Blackjack),
            10 => Ok(Self::Slots),
            11 => Ok(Self::Plinko),
            12 => Ok(Self::Roulette),
            i => Err(Error::InvalidEnum(i)),
        }
    }
}

impl FixedSize for GameKey {
    const SIZE: usize = 1;
}
