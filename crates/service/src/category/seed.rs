use super::domain::CategoryRequest;

/// Default categories, in creation order.
pub const SEED_CATEGORIES: [(&str, &str); 4] = [
    ("Lanche", "Categoria de Lanches"),
    ("Acompanhamento", "Categoria de Acompanhamentos"),
    ("Bebida", "Categoria de Bebidas"),
    ("Sobremesa", "Categoria de Sobremesas"),
];

pub fn seed_requests() -> impl Iterator<Item = CategoryRequest> {
    SEED_CATEGORIES.iter().map(|(name, description)| CategoryRequest::new(*name, *description))
}
