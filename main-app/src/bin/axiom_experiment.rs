// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


use std::path::PathBuf;
use std::time::Instant;
use axioms::axiom::Axiom;
use clap::Parser;
use log::{info, LevelFilter};
use main_app::experiment::{ExperimentSpecification, GeneratorSpecification};
use main_app::init_logging;
use main_app::rules::RuleChoice;

#[derive(Parser)]
#[clap(version = "0.1", author = "Andrew Conway", name="ConcreteAxioms")]
/// Generate lots of random elections, and report how often each voting rule
/// satisfies each social choice axiom.
struct Opts {
    /// A JSON file containing the experiment specification. If given, the other experiment options are ignored.
    #[clap(long)]
    spec : Option<PathBuf>,

    /// The number of random elections to generate.
    #[clap(short = 'n', long, default_value_t = 200)]
    elections : usize,

    /// The number of voters in each election.
    #[clap(long, default_value_t = 1000)]
    votes : usize,

    /// The number of alternatives (candidates) in each election.
    #[clap(short, long, default_value_t = 4)]
    alternatives : usize,

    /// Group the alternatives into coalitions of these sizes, which every voter ranks contiguously.
    /// E.g. --coalitions=2,1,1 means alternatives 0 and 1 form a coalition. The sizes must add up to the number of alternatives.
    #[clap(long, value_delimiter=',')]
    coalitions : Option<Vec<usize>>,

    /// Make every voter rank every alternative.
    #[clap(long)]
    rank_all : bool,

    /// The rules to test, comma separated. Default all of FPTP, IRV, Borda, BordaIRV, TournamentBorda, DowdallBorda.
    /// Append -winner to only consider the winner of a rule, e.g. Borda-winner.
    #[clap(long, value_delimiter=',')]
    rules : Vec<RuleChoice>,

    /// The axioms to test, comma separated. Supported are IIA (winner only), IIAFullRanking and Unanimity. Default IIA.
    #[clap(long, value_delimiter=',')]
    axioms : Vec<Axiom>,

    /// Seed for the pseudo-random number generator.
    #[clap(long, default_value_t = 0)]
    seed : u64,

    /// Print the results as JSON rather than human readable text.
    #[clap(long)]
    json : bool,

    /// Log progress to stderr.
    #[clap(long)]
    verbose : bool,
}

impl Opts {
    fn specification(&self) -> anyhow::Result<ExperimentSpecification> {
        if let Some(path) = &self.spec { return ExperimentSpecification::load(path); }
        let generator = match &self.coalitions {
            Some(sizes) => GeneratorSpecification::Coalition { sizes: sizes.clone(), rank_all: self.rank_all },
            None if self.rank_all => GeneratorSpecification::RankAll,
            None => GeneratorSpecification::Uniform,
        };
        let defaults = ExperimentSpecification::default();
        Ok(ExperimentSpecification{
            num_elections: self.elections,
            num_votes: self.votes,
            num_alternatives: self.alternatives,
            generator,
            rules: if self.rules.is_empty() { defaults.rules } else { self.rules.clone() },
            axioms: if self.axioms.is_empty() { defaults.axioms } else { self.axioms.clone() },
            seed: self.seed,
        })
    }
}

fn main() -> anyhow::Result<()> {
    let opt : Opts = Opts::parse();
    init_logging(if opt.verbose { LevelFilter::Debug } else { LevelFilter::Warn })?;
    let spec = opt.specification()?;
    let now = Instant::now();
    let results = spec.run()?;
    if opt.json { println!("{}",serde_json::to_string(&results)?) }
    else {
        results.print_table_results();
        println!("Took {:.3} seconds",now.elapsed().as_secs_f64());
    }
    info!("Finished {} elections in {:?}",results.num_runs,now.elapsed());
    Ok(())
}
