use ahash::AHashMap;

use crate::{
    data::AttributeTable,
    error::{Error, Result},
    geom::{GeometrySet, SourceId},
};

/// For each merged geometry, a table of the attribute rows of its source
/// geometries, in the order the ids are listed.
pub fn build_carriers(set: &GeometrySet, membership: &[Vec<SourceId>]) -> Result<Vec<AttributeTable>> {
    let attributes = set.attributes().ok_or(Error::MissingAttribute)?;
    let index: AHashMap<SourceId, usize> = set.ids().iter().enumerate()
        .map(|(i, &id)| (id, i))
        .collect();

    membership.iter()
        .map(|ids| {
            let rows = ids.iter()
                .map(|id| index.get(id).copied().ok_or(Error::UnknownSourceId(*id)))
                .collect::<Result<Vec<_>>>()?;
            Ok(attributes.select(&rows))
        })
        .collect()
}
