//! Core card-related types: Card, Rank, Suit, DeckSize

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
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
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(suit: Suit, rank: Rank) -> Self {
        Self { suit, rank }
    }

    /// Stable identity of the card within a full 52-card pack (0..52).
    pub fn ordinal(&self) -> u8 {
        (self.suit as u8) * 13 + self.rank as u8
    }
}

// Note: Ord/Eq on Card is only for stable sorting: suit order C<D<H<S then rank order.
// Use cards_logic for anything involving trump.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Card pool size for a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum DeckSize {
    /// Ranks 6 through Ace in every suit.
    #[default]
    Standard36,
    /// Ranks 2 through Ace in every suit.
    Extended52,
}

impl DeckSize {
    pub const fn card_count(&self) -> usize {
        match self {
            DeckSize::Standard36 => 36,
            DeckSize::Extended52 => 52,
        }
    }

    pub const fn lowest_rank(&self) -> Rank {
        match self {
            DeckSize::Standard36 => Rank::Six,
            DeckSize::Extended52 => Rank::Two,
        }
    }

    /// Every card of this pool in suit-then-rank order.
    pub fn cards(&self) -> Vec<Card> {
        let lowest = self.lowest_rank();
        let mut deck = Vec::with_capacity(self.card_count());
        for suit in Suit::ALL {
            for rank in Rank::ALL.into_iter().filter(|r| *r >= lowest) {
                deck.push(Card { suit, rank });
            }
        }
        deck
    }

    pub fn contains(&self, card: &Card) -> bool {
        card.rank >= self.lowest_rank()
    }
}

impl TryFrom<u8> for DeckSize {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            36 => Ok(DeckSize::Standard36),
            52 => Ok(DeckSize::Extended52),
            other => Err(other),
        }
    }
}
