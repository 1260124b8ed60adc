use registry::database::Result;

pub mod coordinate;
pub mod device;

pub trait DatabaseRow {
    type Model;

    fn to_model(self) -> Result<Self::Model>;
}
