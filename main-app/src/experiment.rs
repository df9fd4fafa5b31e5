// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.

//! Run lots of random elections and see how often each rule satisfies each axiom.


use std::fs::File;
use std::path::Path;
use anyhow::Context;
use axioms::axiom::Axiom;
use axioms::ballot_metadata::NumberOfCandidates;
use axioms::electorate::Electorate;
use axioms::errors::ElectionError;
use axioms::random_util::RankingGenerator;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use crate::rules::{RuleChoice, RuleName};
use crate::satisfaction::SatisfactionResults;

/// How voters' rankings are generated, in a form that can be read from a file.
#[derive(Clone,Debug,Default,PartialEq,Eq,Serialize,Deserialize)]
pub enum GeneratorSpecification {
    /// Each voter ranks between 1 and all of the alternatives, the number and the choice uniformly random.
    #[default]
    Uniform,
    /// Each voter ranks all alternatives, in a uniformly random order.
    RankAll,
    /// Alternatives are grouped into coalitions of the given sizes, and voters rank each coalition contiguously.
    Coalition{ sizes : Vec<usize>, #[serde(default)] rank_all : bool },
}

impl GeneratorSpecification {
    pub fn generator(&self) -> Result<RankingGenerator,ElectionError> {
        match self {
            GeneratorSpecification::Uniform => Ok(RankingGenerator::Uniform),
            GeneratorSpecification::RankAll => Ok(RankingGenerator::RankAll),
            GeneratorSpecification::Coalition { sizes, rank_all } => RankingGenerator::coalition(sizes.clone(),*rank_all),
        }
    }
}

fn default_num_elections() -> usize { 200 }
fn default_num_votes() -> usize { 1000 }
fn default_num_alternatives() -> usize { 4 }
fn default_rules() -> Vec<RuleChoice> { RuleName::ALL.iter().map(|&r|r.into()).collect() }
fn default_axioms() -> Vec<Axiom> { vec![Axiom::IndependenceOfIrrelevantAlternatives { winner_only: true }] }

/// Everything needed to reproduce an experiment.
#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct ExperimentSpecification {
    /// The number of random electorates to generate.
    #[serde(default="default_num_elections")]
    pub num_elections : usize,
    /// The number of voters in each electorate.
    #[serde(default="default_num_votes")]
    pub num_votes : usize,
    #[serde(default="default_num_alternatives")]
    pub num_alternatives : usize,
    #[serde(default)]
    pub generator : GeneratorSpecification,
    #[serde(default="default_rules")]
    pub rules : Vec<RuleChoice>,
    #[serde(default="default_axioms")]
    pub axioms : Vec<Axiom>,
    /// seed for the pseudo-random number generator.
    #[serde(default)]
    pub seed : u64,
}

impl Default for ExperimentSpecification {
    fn default() -> Self {
        ExperimentSpecification{
            num_elections: default_num_elections(),
            num_votes: default_num_votes(),
            num_alternatives: default_num_alternatives(),
            generator: GeneratorSpecification::default(),
            rules: default_rules(),
            axioms: default_axioms(),
            seed: 0,
        }
    }
}

impl ExperimentSpecification {
    /// Read a JSON experiment specification. Missing fields take their default values.
    pub fn load(path:&Path) -> anyhow::Result<Self> {
        let file = File::open(path).with_context(||format!("Could not open experiment specification {}",path.display()))?;
        let spec : ExperimentSpecification = serde_json::from_reader(file).with_context(||format!("Could not parse experiment specification {}",path.display()))?;
        Ok(spec)
    }

    /// Run the experiment. The same specification always gives the same results.
    pub fn run(&self) -> Result<SatisfactionResults,ElectionError> {
        let num_candidates = NumberOfCandidates(self.num_alternatives);
        let generator = self.generator.generator()?;
        if num_candidates.0<1 { return Err(ElectionError::InvalidParameters("an election needs at least one alternative".to_string())); }
        generator.check_compatible(num_candidates)?;
        info!("Running {} elections with {} votes over {} alternatives",self.num_elections,self.num_votes,self.num_alternatives);
        let mut rng = ChaCha20Rng::seed_from_u64(self.seed);
        let mut res = SatisfactionResults::new(&self.rules,&self.axioms);
        for election in 0..self.num_elections {
            let electorate = Electorate::new(self.num_votes,num_candidates,&generator,&mut rng)?;
            res.add_run(&electorate)?;
            debug!("Finished election {}",election);
        }
        Ok(res)
    }
}
