use std::ops::Range;

use crate::error::ImageError;

/// The largest width or height a [`PixelBuffer`] accepts.
pub const MAX_DIMENSION: usize = 3000;

/// The number of color channels stored by a [`PixelBuffer`].
pub const NUM_CHANNELS: usize = 3;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use blurkit_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of pixels covered by this size.
    pub fn num_pixels(&self) -> usize {
        self.width * self.height
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// A color channel of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// The red channel.
    Red,
    /// The green channel.
    Green,
    /// The blue channel.
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; NUM_CHANNELS] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Position of the channel in storage order.
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// A half open range of image rows `[start_row, end_row)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RowRange {
    /// First row of the range (inclusive).
    pub start_row: usize,
    /// Last row of the range (exclusive).
    pub end_row: usize,
}

impl RowRange {
    /// Create a new row range.
    pub fn new(start_row: usize, end_row: usize) -> Self {
        Self { start_row, end_row }
    }

    /// Number of rows in the range.
    pub fn len(&self) -> usize {
        self.end_row.saturating_sub(self.start_row)
    }

    /// Whether the range holds no rows.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The rows of the range as an iterator friendly [`Range`].
    pub fn rows(&self) -> Range<usize> {
        self.start_row..self.end_row
    }
}

/// An RGB image with 8-bit samples stored as three separate planes.
///
/// Every plane holds `width * height` samples in row major order, so the
/// sample at `(x, y)` lives at `y * width + x` in each plane.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    size: ImageSize,
    channels: [Vec<u8>; NUM_CHANNELS],
}

impl PixelBuffer {
    fn validate_size(size: ImageSize) -> Result<(), ImageError> {
        let valid = |d: usize| (1..=MAX_DIMENSION).contains(&d);
        if !valid(size.width) || !valid(size.height) {
            return Err(ImageError::InvalidImageSize(
                size.width,
                size.height,
                MAX_DIMENSION,
            ));
        }
        Ok(())
    }

    /// Create a new pixel buffer from its channel planes.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `channels` - The red, green and blue planes.
    ///
    /// # Errors
    ///
    /// If the size is out of the supported range or any plane length differs
    /// from `width * height`, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use blurkit_image::{ImageSize, PixelBuffer};
    ///
    /// let size = ImageSize { width: 2, height: 1 };
    /// let image = PixelBuffer::new(size, [vec![1, 2], vec![3, 4], vec![5, 6]]).unwrap();
    ///
    /// assert_eq!(image.width(), 2);
    /// assert_eq!(image.height(), 1);
    /// ```
    pub fn new(size: ImageSize, channels: [Vec<u8>; NUM_CHANNELS]) -> Result<Self, ImageError> {
        Self::validate_size(size)?;

        if let Some(plane) = channels.iter().find(|c| c.len() != size.num_pixels()) {
            return Err(ImageError::InvalidChannelShape(
                plane.len(),
                size.num_pixels(),
            ));
        }

        Ok(Self { size, channels })
    }

    /// Create a new pixel buffer with every sample set to `val`.
    ///
    /// # Examples
    ///
    /// ```
    /// use blurkit_image::{Channel, ImageSize, PixelBuffer};
    ///
    /// let image = PixelBuffer::from_size_val(ImageSize { width: 4, height: 3 }, 7).unwrap();
    ///
    /// assert_eq!(image.get(Channel::Blue, 3, 2), Ok(7));
    /// ```
    pub fn from_size_val(size: ImageSize, val: u8) -> Result<Self, ImageError> {
        Self::validate_size(size)?;
        let plane = vec![val; size.num_pixels()];
        Ok(Self {
            size,
            channels: [plane.clone(), plane.clone(), plane],
        })
    }

    /// Create a new pixel buffer from interleaved `RGBRGB...` data.
    ///
    /// # Errors
    ///
    /// If the data length is not `width * height * 3`, an error is returned.
    pub fn from_interleaved(size: ImageSize, data: &[u8]) -> Result<Self, ImageError> {
        Self::validate_size(size)?;

        let expected = size.num_pixels() * NUM_CHANNELS;
        if data.len() != expected {
            return Err(ImageError::InvalidChannelShape(data.len(), expected));
        }

        let mut channels: [Vec<u8>; NUM_CHANNELS] =
            std::array::from_fn(|_| Vec::with_capacity(size.num_pixels()));
        for pixel in data.chunks_exact(NUM_CHANNELS) {
            for (plane, &v) in channels.iter_mut().zip(pixel) {
                plane.push(v);
            }
        }

        Ok(Self { size, channels })
    }

    /// Copy the samples into interleaved `RGBRGB...` order.
    pub fn to_interleaved(&self) -> Vec<u8> {
        let [r, g, b] = self.channels();
        r.iter()
            .zip(g)
            .zip(b)
            .flat_map(|((&r, &g), &b)| [r, g, b])
            .collect()
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        NUM_CHANNELS
    }

    fn index(&self, x: usize, y: usize) -> Result<usize, ImageError> {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }
        Ok(y * self.width() + x)
    }

    /// Get a single sample.
    ///
    /// # Arguments
    ///
    /// * `channel` - The channel to read.
    /// * `x` - The x-coordinate of the pixel.
    /// * `y` - The y-coordinate of the pixel.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned.
    pub fn get(&self, channel: Channel, x: usize, y: usize) -> Result<u8, ImageError> {
        let idx = self.index(x, y)?;
        Ok(self.channels[channel.index()][idx])
    }

    /// Set a single sample.
    ///
    /// # Errors
    ///
    /// If the coordinates are out of bounds, an error is returned.
    pub fn set(&mut self, channel: Channel, x: usize, y: usize, val: u8) -> Result<(), ImageError> {
        let idx = self.index(x, y)?;
        self.channels[channel.index()][idx] = val;
        Ok(())
    }

    /// Get the three samples of a pixel in RGB order.
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<[u8; NUM_CHANNELS], ImageError> {
        let idx = self.index(x, y)?;
        let [r, g, b] = &self.channels;
        Ok([r[idx], g[idx], b[idx]])
    }

    /// Set the three samples of a pixel in RGB order.
    pub fn set_pixel(
        &mut self,
        x: usize,
        y: usize,
        pixel: [u8; NUM_CHANNELS],
    ) -> Result<(), ImageError> {
        let idx = self.index(x, y)?;
        for (plane, v) in self.channels.iter_mut().zip(pixel) {
            plane[idx] = v;
        }
        Ok(())
    }

    /// Get the full plane of a channel.
    pub fn channel(&self, channel: Channel) -> &[u8] {
        &self.channels[channel.index()]
    }

    /// Get mutable access to the full plane of a channel.
    pub fn channel_mut(&mut self, channel: Channel) -> &mut [u8] {
        &mut self.channels[channel.index()]
    }

    /// Get all three planes in storage order.
    pub fn channels(&self) -> [&[u8]; NUM_CHANNELS] {
        let [r, g, b] = &self.channels;
        [r.as_slice(), g.as_slice(), b.as_slice()]
    }

    /// Get mutable access to all three planes in storage order.
    pub fn channels_mut(&mut self) -> [&mut [u8]; NUM_CHANNELS] {
        let [r, g, b] = &mut self.channels;
        [r.as_mut_slice(), g.as_mut_slice(), b.as_mut_slice()]
    }

    /// Get one row of a channel plane.
    ///
    /// PRECONDITION: `y < height`.
    pub fn row(&self, channel: Channel, y: usize) -> &[u8] {
        let width = self.width();
        &self.channels[channel.index()][y * width..(y + 1) * width]
    }

    /// Split the buffer into disjoint mutable row stripes.
    ///
    /// The ranges must be sorted, must not overlap and must end within the
    /// image. Gaps between ranges are allowed and are simply not handed out.
    ///
    /// # Errors
    ///
    /// If a range is out of order, overlaps its predecessor or exceeds the
    /// image height, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use blurkit_image::{Channel, ImageSize, PixelBuffer, RowRange};
    ///
    /// let mut image = PixelBuffer::from_size_val(ImageSize { width: 2, height: 3 }, 0).unwrap();
    /// let ranges = [RowRange::new(0, 1), RowRange::new(1, 3)];
    ///
    /// let mut stripes = image.split_rows_mut(&ranges).unwrap();
    /// stripes[1].channel_mut(Channel::Red).fill(9);
    ///
    /// assert_eq!(image.channel(Channel::Red), &[0, 0, 9, 9, 9, 9]);
    /// ```
    pub fn split_rows_mut(
        &mut self,
        ranges: &[RowRange],
    ) -> Result<Vec<RowStripeMut<'_>>, ImageError> {
        let width = self.width();
        let height = self.height();

        let mut rest = self.channels_mut();
        let mut cursor = 0;
        let mut stripes = Vec::with_capacity(ranges.len());

        for &range in ranges {
            if range.start_row < cursor || range.end_row < range.start_row || range.end_row > height
            {
                return Err(ImageError::InvalidRowRange(
                    range.start_row,
                    range.end_row,
                    height,
                ));
            }

            let skip = (range.start_row - cursor) * width;
            let take = range.len() * width;

            let mut heads: [&mut [u8]; NUM_CHANNELS] = Default::default();
            for (head, plane) in heads.iter_mut().zip(rest.iter_mut()) {
                let remaining = std::mem::take(plane);
                let (_, tail) = remaining.split_at_mut(skip);
                let (stripe, tail) = tail.split_at_mut(take);
                *head = stripe;
                *plane = tail;
            }

            stripes.push(RowStripeMut {
                range,
                width,
                channels: heads,
            });
            cursor = range.end_row;
        }

        Ok(stripes)
    }
}

/// Exclusive mutable access to a contiguous band of rows of a [`PixelBuffer`].
///
/// Obtained from [`PixelBuffer::split_rows_mut`]; stripes of the same buffer
/// never alias, so they can be written from different threads.
#[derive(Debug)]
pub struct RowStripeMut<'a> {
    range: RowRange,
    width: usize,
    channels: [&'a mut [u8]; NUM_CHANNELS],
}

impl RowStripeMut<'_> {
    /// The rows of the parent buffer covered by this stripe.
    pub fn range(&self) -> RowRange {
        self.range
    }

    /// Mutable access to the stripe's part of a channel plane.
    pub fn channel_mut(&mut self, channel: Channel) -> &mut [u8] {
        &mut *self.channels[channel.index()]
    }

    /// Iterate the stripe's rows of a channel, paired with their absolute row index.
    pub fn rows_mut(
        &mut self,
        channel: Channel,
    ) -> impl Iterator<Item = (usize, &mut [u8])> + '_ {
        let width = self.width;
        self.range
            .rows()
            .zip(self.channels[channel.index()].chunks_exact_mut(width))
    }
}
