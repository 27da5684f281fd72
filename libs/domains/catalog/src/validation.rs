//! Field and cross-field validation for Product candidates.
//!
//! The rules are an explicit ordered list of pure functions. Each rule
//! takes the candidate (and the configured limits) and returns zero or one
//! [`Violation`]; [`field_violations`] runs every rule and concatenates the
//! results. Nothing here touches the store.

use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::models::{CreateProduct, UpdateProduct};

pub const NOME_MIN: usize = 5;
pub const NOME_MAX: usize = 15;
pub const IMAGEM_MAX: usize = 300;
pub const PRECO_MIN: i64 = 1;
pub const PRECO_MAX: i64 = 10_000;

/// A single violated rule: the offending field and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Violation {
    pub field: String,
    pub message: String,
}

impl Violation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Runtime-configurable validation bounds.
///
/// The description maximum differs between snapshots of the original
/// system (10 vs 300); it is a knob here, defaulting to 300.
#[derive(Debug, Clone, Copy)]
pub struct ValidationLimits {
    pub descricao_max: usize,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        Self { descricao_max: 300 }
    }
}

/// Borrowed view over the validated fields, shared by the create and
/// update payloads.
#[derive(Debug, Clone, Copy)]
pub struct ProductCandidate<'a> {
    pub nome: &'a str,
    pub descricao: &'a str,
    pub preco: Decimal,
    pub imagem_url: &'a str,
    pub estoque: f32,
}

impl<'a> From<&'a CreateProduct> for ProductCandidate<'a> {
    fn from(input: &'a CreateProduct) -> Self {
        Self {
            nome: &input.nome,
            descricao: &input.descricao,
            preco: input.preco,
            imagem_url: &input.imagem_url,
            estoque: input.estoque,
        }
    }
}

impl<'a> From<&'a UpdateProduct> for ProductCandidate<'a> {
    fn from(input: &'a UpdateProduct) -> Self {
        Self {
            nome: &input.nome,
            descricao: &input.descricao,
            preco: input.preco,
            imagem_url: &input.imagem_url,
            estoque: input.estoque,
        }
    }
}

type FieldRule = fn(&ProductCandidate<'_>, &ValidationLimits) -> Option<Violation>;

fn nome_obrigatorio(c: &ProductCandidate<'_>, _: &ValidationLimits) -> Option<Violation> {
    c.nome
        .is_empty()
        .then(|| Violation::new("nome", "O nome é obrigatório"))
}

fn nome_tamanho(c: &ProductCandidate<'_>, _: &ValidationLimits) -> Option<Violation> {
    let len = c.nome.chars().count();
    (!(NOME_MIN..=NOME_MAX).contains(&len)).then(|| {
        Violation::new(
            "nome",
            format!("O nome deve ter entre {} e {} caracteres", NOME_MIN, NOME_MAX),
        )
    })
}

/// The first character must equal its own uppercase transform (rune-wise,
/// not locale-aware). An empty name is vacuously valid here; the presence
/// rule reports it.
fn nome_primeira_letra_maiuscula(
    c: &ProductCandidate<'_>,
    _: &ValidationLimits,
) -> Option<Violation> {
    let first = c.nome.chars().next()?;
    if first.to_uppercase().to_string() != first.to_string() {
        return Some(Violation::new(
            "nome",
            "A primeira letra do nome deve ser maiúscula",
        ));
    }
    None
}

fn descricao_obrigatoria(c: &ProductCandidate<'_>, _: &ValidationLimits) -> Option<Violation> {
    c.descricao
        .is_empty()
        .then(|| Violation::new("descricao", "A descrição é obrigatória"))
}

fn descricao_tamanho(c: &ProductCandidate<'_>, limits: &ValidationLimits) -> Option<Violation> {
    (c.descricao.chars().count() > limits.descricao_max).then(|| {
        Violation::new(
            "descricao",
            format!(
                "A descrição deve ter no máximo {} caracteres",
                limits.descricao_max
            ),
        )
    })
}

fn preco_faixa(c: &ProductCandidate<'_>, _: &ValidationLimits) -> Option<Violation> {
    let within = c.preco >= Decimal::from(PRECO_MIN) && c.preco <= Decimal::from(PRECO_MAX);
    (!within).then(|| {
        Violation::new(
            "preco",
            format!("O preço deve estar entre {} e {}", PRECO_MIN, PRECO_MAX),
        )
    })
}

fn imagem_obrigatoria(c: &ProductCandidate<'_>, _: &ValidationLimits) -> Option<Violation> {
    c.imagem_url
        .is_empty()
        .then(|| Violation::new("imagem_url", "A imagem é obrigatória"))
}

fn imagem_tamanho(c: &ProductCandidate<'_>, _: &ValidationLimits) -> Option<Violation> {
    (c.imagem_url.chars().count() > IMAGEM_MAX).then(|| {
        Violation::new(
            "imagem_url",
            format!("A imagem deve ter no máximo {} caracteres", IMAGEM_MAX),
        )
    })
}

/// The per-field rules, in reporting order.
const FIELD_RULES: &[FieldRule] = &[
    nome_obrigatorio,
    nome_tamanho,
    nome_primeira_letra_maiuscula,
    descricao_obrigatoria,
    descricao_tamanho,
    preco_faixa,
    imagem_obrigatoria,
    imagem_tamanho,
];

/// Run every field rule against the candidate and concatenate the results.
pub fn field_violations(
    candidate: &ProductCandidate<'_>,
    limits: &ValidationLimits,
) -> Vec<Violation> {
    FIELD_RULES
        .iter()
        .filter_map(|rule| rule(candidate, limits))
        .collect()
}

/// Cross-field rule: stock must be strictly greater than zero.
pub fn estoque_positivo(candidate: &ProductCandidate<'_>) -> Option<Violation> {
    (candidate.estoque <= 0.0).then(|| Violation::new("estoque", "O estoque deve ser maior que zero"))
}

/// Full validation of a Product candidate: every field rule, then the
/// stock rule. Returns the ordered list of violations (possibly empty).
pub fn validate_product(
    candidate: &ProductCandidate<'_>,
    limits: &ValidationLimits,
) -> Vec<Violation> {
    let mut violations = field_violations(candidate, limits);
    violations.extend(estoque_positivo(candidate));
    violations
}
