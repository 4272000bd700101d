//! Frame transport trait

use ledchain_protocol::Frame;

/// Something that can shift a frame into the chain and latch it
///
/// Implementations open the bus (select low), send the frame bytes in
/// [`Frame::transmit_order`] MSB first, then latch (select high). There is
/// no acknowledgment: a successful return only means the lines moved.
pub trait FrameBus {
    /// Error type for line/peripheral failures
    type Error;

    /// Send one frame and latch it into every device
    fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

impl<T: FrameBus + ?Sized> FrameBus for &mut T {
    type Error = T::Error;

    fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        T::write_frame(self, frame)
    }
}
