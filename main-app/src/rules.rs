// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


use std::fmt::{Display, Formatter};
use std::str::FromStr;
use axioms::rules::{BordaWeight, VotingRule};
use serde::{Deserialize, Serialize};

/// Short names for the voting rules that can be selected on the command line.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum RuleName {
    FPTP,
    IRV,
    Borda,
    BordaIRV,
    TournamentBorda,
    DowdallBorda,
}

impl RuleName {
    pub const ALL : [RuleName;6] = [RuleName::FPTP,RuleName::IRV,RuleName::Borda,RuleName::BordaIRV,RuleName::TournamentBorda,RuleName::DowdallBorda];

    pub fn voting_rule(self) -> VotingRule {
        match self {
            RuleName::FPTP => VotingRule::plurality(),
            RuleName::IRV => VotingRule::instant_runoff(),
            RuleName::Borda => VotingRule::borda(BordaWeight::Linear),
            RuleName::BordaIRV => VotingRule::borda(BordaWeight::Linear).with_instant_runoff(),
            RuleName::TournamentBorda => VotingRule::borda(BordaWeight::Tournament),
            RuleName::DowdallBorda => VotingRule::borda(BordaWeight::Dowdall),
        }
    }
}

impl FromStr for RuleName {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FPTP" => Ok(RuleName::FPTP),
            "IRV" => Ok(RuleName::IRV),
            "Borda" => Ok(RuleName::Borda),
            "BordaIRV" => Ok(RuleName::BordaIRV),
            "TournamentBorda" => Ok(RuleName::TournamentBorda),
            "DowdallBorda" => Ok(RuleName::DowdallBorda),
            _ => Err("No such rule supported. Try FPTP, IRV, Borda, BordaIRV, TournamentBorda or DowdallBorda")
        }
    }
}

impl Display for RuleName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RuleName::FPTP => "FPTP",
            RuleName::IRV => "IRV",
            RuleName::Borda => "Borda",
            RuleName::BordaIRV => "BordaIRV",
            RuleName::TournamentBorda => "TournamentBorda",
            RuleName::DowdallBorda => "DowdallBorda",
        };
        f.write_str(s)
    }
}

/// A rule to test, possibly truncated to just the winner. Written as e.g. `Borda` or `Borda-winner`.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(try_from="String",into="String")]
pub struct RuleChoice {
    pub rule : RuleName,
    pub winner_only : bool,
}

const WINNER_ONLY_SUFFIX : &str = "-winner";

impl RuleChoice {
    pub fn voting_rule(self) -> VotingRule {
        let rule = self.rule.voting_rule();
        if self.winner_only { rule.with_winner_only() } else { rule }
    }
}

impl From<RuleName> for RuleChoice {
    fn from(rule: RuleName) -> Self { RuleChoice{ rule, winner_only: false } }
}

impl FromStr for RuleChoice {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.strip_suffix(WINNER_ONLY_SUFFIX) {
            Some(rule) => Ok(RuleChoice{ rule: rule.parse()?, winner_only: true }),
            None => Ok(RuleChoice{ rule: s.parse()?, winner_only: false }),
        }
    }
}

impl Display for RuleChoice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f,"{}{}",self.rule,if self.winner_only { WINNER_ONLY_SUFFIX } else { "" })
    }
}

impl TryFrom<String> for RuleChoice {
    type Error = &'static str;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<RuleChoice> for String {
    fn from(value: RuleChoice) -> Self { value.to_string() }
}
