//! The compute-once pipeline `Grammar -> GrammarInformation -> Automaton`.
//!
//! Every stage is computed eagerly in [`Slr::build`]; the result is plain,
//! immutable data. Share it across threads only after it is built.

use crate::analysis::GrammarInformation;
use crate::automaton::Automaton;
use crate::driver::Recognizer;
use crate::dump;
use crate::error::{BuildError, Conflict};
use crate::grammar::{Grammar, GrammarBuilder};
use std::io::{self, Write};

#[derive(Debug, Clone)]
pub struct Slr {
    grammar: Grammar,
    info: GrammarInformation,
    automaton: Automaton,
}

impl Slr {
    /// Analyzes `grammar` and builds its SLR(1) automaton.
    ///
    /// Fails with the first [`Conflict`] if the grammar is not SLR(1).
    pub fn build(grammar: Grammar) -> Result<Self, Conflict> {
        let info = GrammarInformation::analyze(&grammar);
        let automaton = Automaton::build(&grammar, &info)?;
        log::debug!(
            "SLR(1) tables for {:?}: {} states",
            grammar.name(),
            automaton.states().len()
        );
        Ok(Self {
            grammar,
            info,
            automaton,
        })
    }

    /// Builds the grammar and then its tables.
    pub fn from_builder(builder: GrammarBuilder) -> Result<Self, BuildError> {
        Ok(Self::build(builder.build()?)?)
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    pub fn info(&self) -> &GrammarInformation {
        &self.info
    }

    pub fn automaton(&self) -> &Automaton {
        &self.automaton
    }

    /// A recognizer driving this automaton.
    pub fn recognizer(&self) -> Recognizer<'_> {
        Recognizer::new(&self.grammar, &self.automaton)
    }

    /// Writes productions, item sets, FIRST/FOLLOW sets and the action table.
    pub fn write_report<W: Write>(&self, out: &mut W) -> io::Result<()> {
        dump::write_prods(out, &self.grammar)?;
        writeln!(out)?;
        dump::write_states(out, &self.grammar, self.automaton.states())?;
        dump::write_sets(out, &self.grammar, &self.info)?;
        writeln!(out)?;
        dump::write_table(out, &self.grammar, &self.automaton)?;
        Ok(())
    }
}
