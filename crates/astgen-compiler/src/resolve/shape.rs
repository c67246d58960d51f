use astgen_core::idl::IdlType;

/// Whether `ty` is `T`, `T?`, `T[]`, `T?[]`, `T[]?` or `T?[]?`, with `T` a
/// name or a union.
///
/// Union members are checked separately so each offending member gets its
/// own report.
pub fn is_supported_shape(ty: &IdlType) -> bool {
    let ty = strip_nullable(ty);
    let ty = match ty {
        IdlType::Array(inner, _) => strip_nullable(inner),
        other => other,
    };
    matches!(ty, IdlType::Simple(_) | IdlType::Union(..))
}

fn strip_nullable(ty: &IdlType) -> &IdlType {
    match ty {
        IdlType::Nullable(inner, _) => inner,
        other => other,
    }
}
