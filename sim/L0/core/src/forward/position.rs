//! Geometry placement update.
//!
//! Refreshes [`GeometryData::o_mg`] from the joint placements in
//! [`Data::o_mi`]. Corresponds to pinocchio's `updateGeometryPlacements`
//! without the forward kinematics pass.

use crate::consistency::shape_report;
use crate::types::{Data, GeometryData, GeometryError, GeometryModel, Model};

/// World placement of every geometry object:
/// `o_mg[i] = o_mi[parent_joint(i)] * placement(i)`.
///
/// The whole input is validated before anything is written, so on error
/// `geom_data` is left exactly as it was.
///
/// # Errors
///
/// Returns [`GeometryError::StructuralMismatch`] if `data` is not sized to
/// `model` or `geom_data` is not sized to `geom_model`, and
/// [`GeometryError::UncheckedReference`] for the first geometry object whose
/// parent joint is out of range.
pub fn update_geometry_placements(
    model: &Model,
    data: &Data,
    geom_model: &GeometryModel,
    geom_data: &mut GeometryData,
) -> Result<(), GeometryError> {
    shape_report(model, data, geom_model, geom_data).into_result()?;

    let njoints = model.njoints();
    if let Some((geom_id, obj)) = geom_model
        .iter()
        .enumerate()
        .find(|(_, obj)| obj.parent_joint >= njoints)
    {
        return Err(GeometryError::UncheckedReference {
            geom_id,
            name: obj.name.clone(),
            parent_joint: obj.parent_joint,
            njoints,
        });
    }

    for (o_mg, obj) in geom_data.o_mg_mut().iter_mut().zip(geom_model.iter()) {
        *o_mg = data.o_mi[obj.parent_joint] * obj.placement;
    }
    Ok(())
}
