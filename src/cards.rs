use std::fmt;
use std::str::FromStr;

/// One prime per rank, deuce first. Products of these are unique per rank multiset.
pub const PRIMES: [u32; 13] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41];

/// Card ranks from Two (low, index 0) to Ace (high, index 12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Rank {
    Two = 0,
    Three = 1,
    Four = 2,
    Five = 3,
    Six = 4,
    Seven = 5,
    Eight = 6,
    Nine = 7,
    Ten = 8,
    Jack = 9,
    Queen = 10,
    King = 11,
    Ace = 12,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Index in `0..13`, deuce = 0.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn prime(self) -> u32 {
        PRIMES[self as usize]
    }

    pub const fn bit(self) -> u32 {
        1 << (self as u32)
    }

    pub fn from_index(index: u8) -> Option<Rank> {
        Rank::ALL.get(index as usize).copied()
    }

    pub const fn to_char(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RankParseError {
    #[error("unknown rank {0:?}")]
    Invalid(String),
}

impl FromStr for Rank {
    type Err = RankParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t == "10" {
            return Ok(Rank::Ten);
        }
        let mut chars = t.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => {
                Rank::try_from(c).map_err(|_| RankParseError::Invalid(s.to_string()))
            }
            _ => Err(RankParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Rank {
    type Error = RankParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        let up = c.to_ascii_uppercase();
        Rank::ALL
            .iter()
            .copied()
            .find(|r| r.to_char() == up)
            .ok_or_else(|| RankParseError::Invalid(c.to_string()))
    }
}

/// Four suits, each a distinct one-hot bit so a flush is a bitwise AND.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Suit {
    Spades = 1,
    Hearts = 2,
    Diamonds = 4,
    Clubs = 8,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs];

    pub const fn bit(self) -> u32 {
        self as u32
    }

    pub fn from_bit(bit: u32) -> Option<Suit> {
        Suit::ALL.iter().copied().find(|s| s.bit() == bit)
    }

    pub const fn to_char(self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SuitParseError {
    #[error("unknown suit {0:?}")]
    Invalid(String),
}

impl FromStr for Suit {
    type Err = SuitParseError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        if t.chars().count() == 1 {
            if let Some(c) = t.chars().next() {
                return Suit::try_from(c);
            }
        }
        match t.to_ascii_lowercase().as_str() {
            "spades" => Ok(Suit::Spades),
            "hearts" => Ok(Suit::Hearts),
            "diamonds" => Ok(Suit::Diamonds),
            "clubs" => Ok(Suit::Clubs),
            _ => Err(SuitParseError::Invalid(s.to_string())),
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = SuitParseError;
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c.to_ascii_lowercase() {
            's' | '♠' => Ok(Suit::Spades),
            'h' | '♥' => Ok(Suit::Hearts),
            'd' | '♦' => Ok(Suit::Diamonds),
            'c' | '♣' => Ok(Suit::Clubs),
            _ => Err(SuitParseError::Invalid(c.to_string())),
        }
    }
}

const PRIME_MASK: u32 = 0x3F;
const RANK_SHIFT: u32 = 8;
const SUIT_SHIFT: u32 = 12;
const BITRANK_SHIFT: u32 = 16;

/// A playing card packed into one `u32`:
///
/// ```text
/// xxxbbbbb bbbbbbbb cdhsrrrr xxpppppp
/// ```
///
/// `p` is the rank prime, `r` the rank index, `cdhs` the one-hot suit and
/// `b` the rank bit.
///
/// ```
/// use holdem_rs::cards::{Card, Rank, Suit};
///
/// let card = Card::new(Rank::King, Suit::Diamonds);
/// assert_eq!(card.raw(), 0b0000_1000_0000_0000_0100_1011_0010_0101);
/// assert_eq!(card.prime(), 37);
/// assert_eq!(card.to_string(), "Kd");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card(u32);

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        let r = rank as u32;
        let bitrank = (1 << r) << BITRANK_SHIFT;
        Card(bitrank | (suit as u32) << SUIT_SHIFT | r << RANK_SHIFT | PRIMES[r as usize])
    }

    /// Build a card from a rank character (`2`..`9`, `T`, `J`, `Q`, `K`, `A`)
    /// and a suit character (`s`/`h`/`d`/`c` or `♠`/`♥`/`♦`/`♣`).
    pub fn from_chars(rank_char: char, suit_char: char) -> Result<Self, CardParseError> {
        let rank = Rank::try_from(rank_char)?;
        let suit = Suit::try_from(suit_char)?;
        Ok(Card::new(rank, suit))
    }

    /// The packed integer.
    pub const fn raw(self) -> u32 {
        self.0
    }

    pub const fn rank_index(self) -> u8 {
        ((self.0 >> RANK_SHIFT) & 0xF) as u8
    }

    pub fn rank(self) -> Rank {
        Rank::ALL[self.rank_index() as usize]
    }

    /// The suit nibble (1, 2, 4 or 8).
    pub const fn suit_bits(self) -> u32 {
        (self.0 >> SUIT_SHIFT) & 0xF
    }

    pub fn suit(self) -> Suit {
        match self.suit_bits() {
            1 => Suit::Spades,
            2 => Suit::Hearts,
            4 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }

    pub const fn prime(self) -> u32 {
        self.0 & PRIME_MASK
    }

    /// `1 << rank`.
    pub const fn bit_rank(self) -> u32 {
        (self.0 >> BITRANK_SHIFT) & 0x1FFF
    }

    /// `[ A ♠ ]` style rendering.
    pub fn pretty(self) -> String {
        format!("[ {} {} ]", self.rank(), self.suit().symbol())
    }

    /// The packed bits in nibble groups, most significant first. Debugging aid.
    pub fn binary_string(self) -> String {
        let bits = format!("{:032b}", self.0);
        bits.as_bytes()
            .chunks(4)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank(), self.suit())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("not a card: {0:?}")]
    Invalid(String),
    #[error(transparent)]
    Rank(#[from] RankParseError),
    #[error(transparent)]
    Suit(#[from] SuitParseError),
}

impl FromStr for Card {
    type Err = CardParseError;

    /// Accepts `As`, `10d`, `A♠` and the symbol-first `♠A`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let t = s.trim();
        let chars: Vec<char> = t.chars().collect();
        if chars.len() < 2 {
            return Err(CardParseError::Invalid(s.to_string()));
        }

        let first_is_symbol = matches!(chars[0], '♠' | '♥' | '♦' | '♣');
        let (rank_str, suit_ch): (String, char) = if first_is_symbol {
            (chars[1..].iter().collect(), chars[0])
        } else {
            (chars[..chars.len() - 1].iter().collect(), chars[chars.len() - 1])
        };

        let rank = Rank::from_str(&rank_str)?;
        let suit = Suit::try_from(suit_ch)?;
        Ok(Card::new(rank, suit))
    }
}

/// Cards separated by whitespace and/or commas.
///
/// ```
/// use holdem_rs::cards::parse_cards;
///
/// let cards = parse_cards("As, Kd 10c").unwrap();
/// let shown: Vec<String> = cards.iter().map(|c| c.to_string()).collect();
/// assert_eq!(shown, ["As", "Kd", "Tc"]);
/// assert!(parse_cards("As 1x").is_err());
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

/// Product of every card's rank prime. Fits in `u32` for up to five cards.
pub fn prime_product_from_hand(cards: &[Card]) -> u32 {
    cards.iter().map(|c| c.prime()).product()
}

/// Product of the primes whose rank bit is set in `rankbits` (13 low bits).
/// Used for flushes and straights, where all five ranks are distinct.
pub fn prime_product_from_rankbits(rankbits: u32) -> u32 {
    Rank::ALL.iter().filter(|r| rankbits & r.bit() != 0).map(|r| r.prime()).product()
}

pub fn card_list_to_pretty_str(cards: &[Card]) -> String {
    cards.iter().map(|c| c.pretty()).collect::<Vec<_>>().join(" ")
}
