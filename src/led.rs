//! LED states, and the tri-state spec that changes them

use core::convert::Infallible;
use core::fmt;

use log::warn;

use crate::{command::State, error::RequestError, port::LedBank};

/// One position of a LED spec
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LedSymbol {
    /// `'1'`
    On,
    /// `'0'`
    Off,
    /// `'-'`, or anything else
    Keep,
}

impl From<char> for LedSymbol {
    fn from(symbol: char) -> Self {
        match symbol {
            '1' => LedSymbol::On,
            '0' => LedSymbol::Off,
            _ => LedSymbol::Keep,
        }
    }
}

impl LedSymbol {
    /// What a LED ends up as, given what it was
    pub fn resolve(self, previous: State) -> State {
        match self {
            LedSymbol::On => State::On,
            LedSymbol::Off => State::Off,
            LedSymbol::Keep => previous,
        }
    }
}

/// A validated LED spec, no longer than the LED bank
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedSpec {
    symbols: Vec<LedSymbol>,
}

impl LedSpec {
    /// Parse a spec like `1-0-1--` for a bank of `led_count` LEDs
    ///
    /// Shorter specs leave the trailing LEDs alone.
    pub fn parse(spec: &str, led_count: usize) -> Result<Self, RequestError> {
        let len = spec.chars().count();
        if len > led_count {
            return Err(RequestError::LedSpecTooLong {
                spec: spec.to_owned(),
                len,
                max: led_count,
            });
        }

        let symbols = spec
            .chars()
            .enumerate()
            .map(|(index, symbol)| {
                if !matches!(symbol, '0' | '1' | '-') {
                    warn!("LED {index}: unknown symbol {symbol:?}, left unchanged");
                }
                LedSymbol::from(symbol)
            })
            .collect();

        Ok(Self { symbols })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[LedSymbol] {
        &self.symbols
    }

    /// The LED states after applying this spec on top of `previous`
    pub fn apply(&self, previous: &[State]) -> Vec<State> {
        previous
            .iter()
            .enumerate()
            .map(|(index, &state)| match self.symbols.get(index) {
                Some(symbol) => symbol.resolve(state),
                None => state,
            })
            .collect()
    }
}

impl fmt::Display for LedSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.symbols.iter().try_for_each(|symbol| {
            f.write_str(match symbol {
                LedSymbol::On => "1",
                LedSymbol::Off => "0",
                LedSymbol::Keep => "-",
            })
        })
    }
}

/// A LED bank that only lives in memory, every LED starts off
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedVector {
    states: Vec<State>,
}

impl LedVector {
    pub fn new(led_count: usize) -> Self {
        Self {
            states: vec![State::Off; led_count],
        }
    }

    pub fn states(&self) -> &[State] {
        &self.states
    }
}

impl From<Vec<State>> for LedVector {
    fn from(states: Vec<State>) -> Self {
        Self { states }
    }
}

impl LedBank for LedVector {
    type Error = Infallible;

    fn len(&self) -> usize {
        self.states.len()
    }

    fn read_state(&self) -> Vec<State> {
        self.states.clone()
    }

    fn write(&mut self, index: usize, state: State) -> Result<(), Self::Error> {
        if let Some(led) = self.states.get_mut(index) {
            *led = state;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use State::{Off, On};

    #[test]
    fn forced_symbols_win_and_dashes_keep() {
        let spec = LedSpec::parse("1-0-1--", 7).unwrap();
        let previous = [Off, On, On, Off, Off, On, Off];
        assert_eq!(spec.apply(&previous), vec![On, On, Off, Off, On, On, Off]);
    }

    #[test]
    fn short_spec_leaves_the_tail_alone() {
        let spec = LedSpec::parse("00", 7).unwrap();
        let previous = [On; 7];
        assert_eq!(spec.apply(&previous), vec![Off, Off, On, On, On, On, On]);
    }

    #[test]
    fn unknown_symbols_keep_the_previous_state() {
        let spec = LedSpec::parse("x1?", 7).unwrap();
        assert_eq!(spec.symbols()[0], LedSymbol::Keep);
        assert_eq!(spec.apply(&[On, Off, On]), vec![On, On, On]);
        assert_eq!(spec.to_string(), "-1-");
    }

    #[test]
    fn full_length_spec_is_accepted() {
        assert_eq!(LedSpec::parse("1111111", 7).unwrap().len(), 7);
        assert!(LedSpec::parse("", 7).unwrap().is_empty());
    }

    #[test]
    fn spec_longer_than_the_bank_is_refused() {
        assert_eq!(
            LedSpec::parse("11110000", 7),
            Err(RequestError::LedSpecTooLong {
                spec: "11110000".into(),
                len: 8,
                max: 7
            })
        );
    }

    #[test]
    fn led_vector_starts_off_and_tracks_writes() {
        let mut bank = LedVector::new(3);
        assert_eq!(bank.read_state(), vec![Off, Off, Off]);
        bank.write(1, On).unwrap();
        assert_eq!(bank.states(), &[Off, On, Off]);
    }

    fn states(len: usize) -> impl Strategy<Value = Vec<State>> {
        prop::collection::vec(any::<bool>().prop_map(State::from), len)
    }

    proptest! {
        #[test]
        fn untouched_positions_keep_their_state(
            previous in states(7),
            spec in "[01\\-x]{0,7}",
        ) {
            let parsed = LedSpec::parse(&spec, 7).unwrap();
            let next = parsed.apply(&previous);
            prop_assert_eq!(next.len(), previous.len());

            let symbols: Vec<char> = spec.chars().collect();
            for (index, state) in next.iter().enumerate() {
                match symbols.get(index) {
                    Some('1') => prop_assert_eq!(*state, On),
                    Some('0') => prop_assert_eq!(*state, Off),
                    _ => prop_assert_eq!(*state, previous[index]),
                }
            }
        }

        #[test]
        fn applying_twice_changes_nothing_more(previous in states(7), spec in "[01\\-]{0,7}") {
            let parsed = LedSpec::parse(&spec, 7).unwrap();
            let once = parsed.apply(&previous);
            prop_assert_eq!(parsed.apply(&once), once);
        }
    }
}
