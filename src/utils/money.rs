// Utilitários para valores monetários no formato brasileiro

/// Converte `"1.234,56"` em `"1234.56"`.
///
/// Remove todos os `.` (separador de milhar) e troca `,` por `.`. Não arredonda
/// nem valida o número: entrada não numérica segue adiante e é rejeitada pela
/// API de comprovantes.
pub fn normalize_amount(amount: &str) -> String {
    amount.trim().replace('.', "").replace(',', ".")
}
