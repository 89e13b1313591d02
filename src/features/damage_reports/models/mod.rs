mod damage_report;

pub use damage_report::{
    DamageFields, DamageHistory, DamageReport, DamageStatus, DraftChanges, NewDamageDraft,
    NewDamageHistory,
};
