use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::alternative::{Alternative, Attribute};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExtractError {
    #[error("attribute `{0}` is missing")]
    MissingAttribute(String),
    #[error("attribute `{0}` is not numeric")]
    NotNumeric(String),
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),
}

/// Produces the raw value of one axis for one alternative.
pub trait Extractor<A: ?Sized> {
    fn extract(&self, alternative: &A) -> Result<f64, ExtractError>;
}

impl<A: ?Sized, F> Extractor<A> for F
where
    F: Fn(&A) -> f64,
{
    fn extract(&self, alternative: &A) -> Result<f64, ExtractError> {
        Ok(self(alternative))
    }
}

/// Declarative raw-value expression over an [`Alternative`].
///
/// In scenario files a number is a constant, a string is a dotted attribute path and a
/// map tagged with `op` is an operation:
///
/// ```yaml
/// value: education.math
/// value: { op: sub, lhs: 20000, rhs: education.usnews }
/// value: { op: weighted, terms: [{ weight: 0.3, of: crime.violent }, { weight: 0.7, of: crime.property }] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Metric {
    Constant(f64),
    Attribute(String),
    Op(Op),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Var {
        name: String,
    },
    Sum {
        terms: Vec<Metric>,
    },
    Sub {
        lhs: Box<Metric>,
        rhs: Box<Metric>,
    },
    Product {
        factors: Vec<Metric>,
    },
    Abs {
        of: Box<Metric>,
    },
    Weighted {
        terms: Vec<WeightedTerm>,
    },
    /// Level monthly payment of a fixed-rate loan; `apr` is in percent.
    MonthlyPayment {
        principal: Box<Metric>,
        apr: f64,
        years: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub weight: f64,
    pub of: Metric,
}

impl Metric {
    pub fn attr(path: impl Into<String>) -> Self {
        Metric::Attribute(path.into())
    }

    pub fn bind<'a>(&'a self, vars: &'a BTreeMap<String, f64>) -> BoundMetric<'a> {
        BoundMetric { metric: self, vars }
    }

    pub fn eval(
        &self,
        alternative: &Alternative,
        vars: &BTreeMap<String, f64>,
    ) -> Result<f64, ExtractError> {
        match self {
            Metric::Constant(v) => Ok(*v),
            Metric::Attribute(path) => match alternative.lookup(path) {
                Some(Attribute::Number(v)) => Ok(*v),
                Some(Attribute::Null) | None => Err(ExtractError::MissingAttribute(path.clone())),
                Some(_) => Err(ExtractError::NotNumeric(path.clone())),
            },
            Metric::Op(op) => op.eval(alternative, vars),
        }
    }
}

impl Op {
    fn eval(
        &self,
        alternative: &Alternative,
        vars: &BTreeMap<String, f64>,
    ) -> Result<f64, ExtractError> {
        match self {
            Op::Var { name } => vars
                .get(name)
                .copied()
                .ok_or_else(|| ExtractError::UnknownVariable(name.clone())),
            Op::Sum { terms } => {
                let mut acc = 0.0;
                for term in terms {
                    acc += term.eval(alternative, vars)?;
                }
                Ok(acc)
            }
            Op::Sub { lhs, rhs } => Ok(lhs.eval(alternative, vars)? - rhs.eval(alternative, vars)?),
            Op::Product { factors } => {
                let mut acc = 1.0;
                for factor in factors {
                    acc *= factor.eval(alternative, vars)?;
                }
                Ok(acc)
            }
            Op::Abs { of } => Ok(of.eval(alternative, vars)?.abs()),
            Op::Weighted { terms } => {
                let mut acc = 0.0;
                for term in terms {
                    acc += term.weight * term.of.eval(alternative, vars)?;
                }
                Ok(acc)
            }
            Op::MonthlyPayment {
                principal,
                apr,
                years,
            } => Ok(monthly_payment(
                principal.eval(alternative, vars)?,
                *apr,
                *years,
            )),
        }
    }
}

pub fn monthly_payment(principal: f64, apr: f64, years: f64) -> f64 {
    let n = (years * 12.0).ceil();
    if n <= 0.0 {
        return principal;
    }
    let r = apr / 100.0 / 12.0;
    if r == 0.0 {
        return principal / n;
    }
    principal * r / (1.0 - (1.0 + r).powf(-n))
}

#[derive(Debug, Clone, Copy)]
pub struct BoundMetric<'a> {
    metric: &'a Metric,
    vars: &'a BTreeMap<String, f64>,
}

impl Extractor<Alternative> for BoundMetric<'_> {
    fn extract(&self, alternative: &Alternative) -> Result<f64, ExtractError> {
        self.metric.eval(alternative, self.vars)
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/metric.rs"]
mod tests;
