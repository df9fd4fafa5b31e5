// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.

//! Tally how often each rule satisfies each axiom over many random electorates.


use axioms::axiom::Axiom;
use axioms::electorate::Electorate;
use axioms::errors::ElectionError;
use log::trace;
use serde::{Deserialize, Serialize};
use crate::rules::RuleChoice;

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct SatisfactionResults {
    /// The total number of electorates checked.
    pub num_runs : usize,
    pub rules : Vec<RuleSatisfaction>,
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct RuleSatisfaction {
    pub rule : RuleChoice,
    /// one for each axiom, in the same order for every rule.
    pub axioms : Vec<AxiomSatisfaction>,
}

#[derive(Clone,Debug,PartialEq,Serialize,Deserialize)]
pub struct AxiomSatisfaction {
    pub axiom : Axiom,
    /// The number of runs on which the rule satisfied the axiom.
    pub num_satisfied : usize,
}

impl AxiomSatisfaction {
    fn merge(&mut self,other:&AxiomSatisfaction) {
        assert_eq!(self.axiom,other.axiom);
        self.num_satisfied+=other.num_satisfied;
    }
}

impl SatisfactionResults {
    pub fn new(rules:&[RuleChoice],axioms:&[Axiom]) -> Self {
        let rules = rules.iter().map(|&rule|RuleSatisfaction{
            rule,
            axioms: axioms.iter().map(|&axiom|AxiomSatisfaction{ axiom, num_satisfied: 0 }).collect(),
        }).collect();
        SatisfactionResults{ num_runs: 0, rules }
    }

    /// Check every rule against every axiom on this electorate, and add the outcomes.
    /// On error nothing is added.
    pub fn add_run(&mut self,electorate:&Electorate) -> Result<(),ElectionError> {
        let mut outcomes = Vec::with_capacity(self.rules.len());
        for rule in &self.rules {
            let voting_rule = rule.rule.voting_rule();
            let mut satisfied = Vec::with_capacity(rule.axioms.len());
            for axiom in &rule.axioms {
                let ok = axiom.axiom.check(electorate,&voting_rule)?;
                trace!("{} {} {}",rule.rule,if ok {"satisfied"} else {"failed"},axiom.axiom);
                satisfied.push(ok);
            }
            outcomes.push(satisfied);
        }
        for (rule,satisfied) in self.rules.iter_mut().zip(outcomes) {
            for (axiom,ok) in rule.axioms.iter_mut().zip(satisfied) {
                if ok { axiom.num_satisfied+=1; }
            }
        }
        self.num_runs+=1;
        Ok(())
    }

    /// add in other to the cumulative sum of self. Must have the same rules and axioms.
    pub fn merge(&mut self,other:&SatisfactionResults) {
        assert_eq!(self.rules.len(),other.rules.len());
        self.num_runs+=other.num_runs;
        for (mine,theirs) in self.rules.iter_mut().zip(&other.rules) {
            assert_eq!(mine.rule,theirs.rule);
            for (a,b) in mine.axioms.iter_mut().zip(&theirs.axioms) { a.merge(b); }
        }
    }

    /// The percentage of runs on which `rule` satisfied `axiom`, or None if that combination is not being tallied or there have been no runs.
    pub fn percentage(&self,rule:RuleChoice,axiom:Axiom) -> Option<f64> {
        if self.num_runs==0 { return None; }
        let rule = self.rules.iter().find(|r|r.rule==rule)?;
        let axiom = rule.axioms.iter().find(|a|a.axiom==axiom)?;
        Some(100.0*axiom.num_satisfied as f64/self.num_runs as f64)
    }

    pub fn print_table_results(&self) {
        for rule in &self.rules {
            for axiom in &rule.axioms {
                if let Some(percentage) = self.percentage(rule.rule,axiom.axiom) {
                    println!("{} satisfies {} {}% of the time",rule.rule,axiom.axiom,percentage);
                }
            }
        }
    }
}
