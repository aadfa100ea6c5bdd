use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum ExerciseRep {
    Table,
    Id,
    Username,
    ExerciseName,
    Quantity,
    QuantityUnit,
    PerformedAt,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum ExerciseRepPlanned {
    Table,
    Id,
    Username,
    ExerciseName,
    Quantity,
    DatePlanned,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum Users {
    Table,
    Id,
    Name,
    Email,
    CreatedAt,
}
