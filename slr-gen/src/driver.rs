//! Table-driven recognizer over a built [`Automaton`].
//!
//! Runs the shift/reduce loop the generated parsers run, on a stream of
//! terminal codes, and reports the productions it reduced by. The input is
//! accepted when it is exhausted while the accepting state is on top of the
//! stack.

use crate::analysis::Lookahead;
use crate::automaton::Automaton;
use crate::grammar::{Grammar, ProdId, SymbolId};
use anyhow::{Result, anyhow, bail};
use smartstring::alias::String;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecognizerStats {
    pub tokens: usize,
    pub shifts: usize,
    pub reductions: usize,
}

pub struct Recognizer<'a> {
    grammar: &'a Grammar,
    automaton: &'a Automaton,
    states: Vec<usize>,
    stats: RecognizerStats,
}

impl<'a> Recognizer<'a> {
    pub fn new(grammar: &'a Grammar, automaton: &'a Automaton) -> Self {
        Self {
            grammar,
            automaton,
            states: Vec::new(),
            stats: RecognizerStats::default(),
        }
    }

    pub fn stats(&self) -> RecognizerStats {
        self.stats.clone()
    }

    fn next_token(&mut self, input: &mut impl Iterator<Item = SymbolId>) -> Result<Lookahead> {
        match input.next() {
            Some(t) if self.grammar.is_terminal(t) && t < self.grammar.symbols_count() => {
                self.stats.tokens += 1;
                Ok(Lookahead::Terminal(t))
            }
            Some(t) => bail!("symbol code {} is not a terminal", t),
            None => Ok(Lookahead::Eof),
        }
    }

    fn token_name(&self, token: Lookahead) -> &str {
        match token {
            Lookahead::Terminal(t) => self.grammar.symbol_name(t),
            Lookahead::Eof => "$",
        }
    }

    /// Recognizes a sequence of terminal codes.
    ///
    /// Returns the productions reduced by, in order (a reversed rightmost
    /// derivation).
    pub fn recognize<I>(&mut self, input: I) -> Result<Vec<ProdId>>
    where
        I: IntoIterator<Item = SymbolId>,
    {
        self.states.clear();
        self.stats = RecognizerStats::default();
        let accepting = self
            .automaton
            .accepting_state()
            .ok_or_else(|| anyhow!("automaton has no accepting state"))?;

        let mut input = input.into_iter();
        let mut reductions = Vec::new();
        let mut token = self.next_token(&mut input)?;
        self.states.push(0);

        loop {
            if log::log_enabled!(log::Level::Trace) {
                self.dump_state(token);
            }
            let state = *self
                .states
                .last()
                .ok_or_else(|| anyhow!("stack underflow"))?;

            if token == Lookahead::Eof && state == accepting {
                log::trace!("Accept");
                return Ok(reductions);
            }

            if let Lookahead::Terminal(t) = token
                && let Some(next) = self.automaton.state(state).transition(t)
            {
                log::trace!("Shift {}", next);
                self.states.push(next);
                self.stats.shifts += 1;
                token = self.next_token(&mut input)?;
                continue;
            }

            let Some(item) = self.automaton.reduces().get(state, token) else {
                bail!(
                    "unexpected {} in state {}",
                    self.token_name(token),
                    state
                );
            };
            let prod = self.grammar.production(item.prod);
            log::trace!("Reduce {}({})", item.prod, item.display(self.grammar));

            let n = prod.rhs().len();
            if self.states.len() <= n {
                bail!("stack underflow");
            }
            self.states.truncate(self.states.len() - n);
            let top = *self
                .states
                .last()
                .ok_or_else(|| anyhow!("stack underflow"))?;
            let Some(next) = self.automaton.state(top).transition(prod.lhs()) else {
                bail!(
                    "no goto on {} from state {}",
                    self.grammar.symbol_name(prod.lhs()),
                    top
                );
            };
            self.states.push(next);
            self.stats.reductions += 1;
            reductions.push(item.prod);
        }
    }

    /// Recognizes a sequence of terminal names.
    pub fn recognize_names(&mut self, names: &[&str]) -> Result<Vec<ProdId>> {
        let codes = names
            .iter()
            .map(|name| {
                self.grammar
                    .symbol_code(name)
                    .ok_or_else(|| anyhow!("unknown terminal {:?}", name))
            })
            .collect::<Result<Vec<_>>>()?;
        self.recognize(codes)
    }

    fn dump_state(&self, incoming: Lookahead) {
        let mut output = String::new();
        for state in &self.states {
            output.push_str(&format!("<{}> ", state));
        }
        output.push_str(&format!("<-  {}", self.token_name(incoming)));
        log::trace!("{}", output);
    }
}

#[cfg(test)]
mod tests {
    use crate::grammar::ProdId;
    use crate::slr::Slr;
    use crate::test_grammars;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn ids(v: &[usize]) -> Vec<ProdId> {
        v.iter().copied().map(ProdId).collect()
    }

    #[test]
    fn balanced_input_is_accepted() {
        init_logger();
        let slr = Slr::build(test_grammars::epsilon()).unwrap();
        let mut r = slr.recognizer();
        assert_eq!(r.recognize_names(&["a", "a", "b", "b"]).unwrap(), ids(&[2, 1, 1]));
        let stats = r.stats();
        assert_eq!(stats.tokens, 4);
        assert_eq!(stats.shifts, 4);
        assert_eq!(stats.reductions, 3);
    }

    #[test]
    fn empty_input_reduces_epsilon() {
        let slr = Slr::build(test_grammars::epsilon()).unwrap();
        assert_eq!(slr.recognizer().recognize_names(&[]).unwrap(), ids(&[2]));
    }

    #[test]
    fn unbalanced_input_is_rejected() {
        let slr = Slr::build(test_grammars::epsilon()).unwrap();
        let mut r = slr.recognizer();
        let err = r.recognize_names(&["a", "b", "b"]).unwrap_err();
        assert!(err.to_string().contains("unexpected b"), "{err}");
        let err = r.recognize_names(&["a", "a", "b"]).unwrap_err();
        assert!(err.to_string().contains("unexpected $"), "{err}");
    }

    #[test]
    fn expression_reaches_accepting_state() {
        init_logger();
        let slr = Slr::build(test_grammars::expr()).unwrap();
        let mut r = slr.recognizer();
        assert_eq!(r.recognize_names(&["id"]).unwrap(), ids(&[6, 4, 2]));
        for input in [
            &["id", "+", "id", "*", "id"][..],
            &["(", "id", "+", "id", ")", "*", "id"][..],
            &["(", "(", "id", ")", ")"][..],
        ] {
            let reductions = r.recognize_names(input).unwrap();
            // the last reduction always produces the start symbol E
            let last = *reductions.last().unwrap();
            assert_eq!(slr.grammar().production(last).lhs(), slr.grammar().start());
        }
    }

    #[test]
    fn malformed_expressions_are_rejected() {
        let slr = Slr::build(test_grammars::expr()).unwrap();
        let mut r = slr.recognizer();
        for input in [
            &["id", "+"][..],
            &["(", "id"][..],
            &["id", "id"][..],
            &[")"][..],
            &[][..],
        ] {
            assert!(r.recognize_names(input).is_err(), "{input:?}");
        }
    }

    #[test]
    fn nonterminal_codes_are_not_input() {
        let slr = Slr::build(test_grammars::expr()).unwrap();
        let e = slr.grammar().symbol_code("E").unwrap();
        let err = slr.recognizer().recognize([e]).unwrap_err();
        assert!(err.to_string().contains("not a terminal"));
        assert!(slr.recognizer().recognize_names(&["nope"]).is_err());
    }
}
